//! Classifying the memory region behind an address.
//!
//! The operating system is asked, through a `RegionQuery`, to describe the
//! region containing an address. The description is advisory. Nothing
//! prevents the region from being unmapped or reprotected between the query
//! and a later access.
//!
//! Backends are chosen when the crate is built. `host()` returns the backend
//! for the compilation target, or `Unsupported`, which answers every query
//! with `None`.

mod options;
pub mod procfs;
#[cfg(windows)]
pub mod windows;

pub use self::options::{Backend, Options, OptionsBuilder};
pub use self::procfs::ProcMaps;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Page protection flags.
    ///
    /// The bit values follow the Windows `PAGE_*` constants, so a protection
    /// reported by `VirtualQuery` converts without translation. Other
    /// backends map their permissions onto this vocabulary.
    #[derive(Default, Deserialize, Serialize)]
    pub struct Protection: u32 {
        const NOACCESS                   = 0x0000_0001;
        const READONLY                   = 0x0000_0002;
        const READWRITE                  = 0x0000_0004;
        const WRITECOPY                  = 0x0000_0008;
        const EXECUTE                    = 0x0000_0010;
        const EXECUTE_READ               = 0x0000_0020;
        const EXECUTE_READWRITE          = 0x0000_0040;
        const EXECUTE_WRITECOPY          = 0x0000_0080;
        const GUARD                      = 0x0000_0100;
        const NOCACHE                    = 0x0000_0200;
        const WRITECOMBINE               = 0x0000_0400;
        const GRAPHICS_NOACCESS          = 0x0000_0800;
        const GRAPHICS_READONLY          = 0x0000_1000;
        const GRAPHICS_READWRITE         = 0x0000_2000;
        const GRAPHICS_EXECUTE           = 0x0000_4000;
        const GRAPHICS_EXECUTE_READ      = 0x0000_8000;
        const GRAPHICS_EXECUTE_READWRITE = 0x0001_0000;

        /// Any flag which permits reading.
        const READABLE = Self::READONLY.bits
            | Self::READWRITE.bits
            | Self::WRITECOPY.bits
            | Self::EXECUTE_READ.bits
            | Self::EXECUTE_READWRITE.bits
            | Self::EXECUTE_WRITECOPY.bits
            | Self::GRAPHICS_READONLY.bits
            | Self::GRAPHICS_READWRITE.bits
            | Self::GRAPHICS_EXECUTE_READ.bits
            | Self::GRAPHICS_EXECUTE_READWRITE.bits;

        /// Any flag which permits writing.
        const WRITEABLE = Self::READWRITE.bits
            | Self::WRITECOPY.bits
            | Self::EXECUTE_READWRITE.bits
            | Self::EXECUTE_WRITECOPY.bits
            | Self::GRAPHICS_READWRITE.bits
            | Self::GRAPHICS_EXECUTE_READWRITE.bits;
    }
}

impl Protection {
    /// Returns `true` if this protection forbids every access, either
    /// outright or by marking the region as a guard region.
    pub fn is_inaccessible(&self) -> bool {
        self.is_empty() || self.intersects(Protection::NOACCESS | Protection::GUARD)
    }
}

/// Whether a region is backed by memory.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum RegionState {
    /// Backed by physical memory or the page file.
    Commit,
    /// Address space is reserved, with nothing behind it.
    Reserve,
    /// Not allocated.
    Free,
}

/// A description of the region containing a queried address.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RegionDescriptor {
    base: usize,
    size: usize,
    state: RegionState,
    protection: Protection,
}

impl RegionDescriptor {
    /// Create a new `RegionDescriptor`.
    pub fn new(
        base: usize,
        size: usize,
        state: RegionState,
        protection: Protection,
    ) -> RegionDescriptor {
        RegionDescriptor {
            base,
            size,
            state,
            protection,
        }
    }

    /// The first address of this region.
    pub fn base(&self) -> usize {
        self.base
    }

    /// The size of this region in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether this region is committed, reserved or free.
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// The page protection shared by every page in this region.
    pub fn protection(&self) -> Protection {
        self.protection
    }

    /// The part of this region from the page containing `address` to the
    /// end of the region. This is how `VirtualQuery` reports a region, and
    /// makes `size` the number of bytes left from that page on.
    ///
    /// `page_size` must be a power of two, and `address` should fall inside
    /// this region.
    pub fn from_page(&self, address: usize, page_size: usize) -> RegionDescriptor {
        debug_assert!(page_size.is_power_of_two());
        let base = (address & !(page_size - 1))
            .clamp(self.base, self.base + self.size.saturating_sub(1));
        RegionDescriptor {
            base,
            size: self.size - (base - self.base),
            state: self.state,
            protection: self.protection,
        }
    }

    /// Returns `true` if `address` falls inside this region.
    pub fn contains(&self, address: usize) -> bool {
        address >= self.base && address - self.base < self.size
    }

    /// Returns `true` if this region is committed, accessible in some way,
    /// and at least `min_size` bytes long.
    pub fn is_accessible(&self, min_size: usize) -> bool {
        self.size >= min_size
            && self.state == RegionState::Commit
            && !self.protection.is_inaccessible()
    }

    /// Returns `true` if this region is accessible and permits reads.
    pub fn is_readable(&self, min_size: usize) -> bool {
        self.is_accessible(min_size) && self.protection.intersects(Protection::READABLE)
    }

    /// Returns `true` if this region is accessible and permits writes.
    pub fn is_writeable(&self, min_size: usize) -> bool {
        self.is_accessible(min_size) && self.protection.intersects(Protection::WRITEABLE)
    }
}

/// A source of region descriptions, typically the operating system.
pub trait RegionQuery {
    /// Describe the region containing `address`, or `None` if the address is
    /// unmapped or the backend cannot answer.
    fn query_region(&self, address: usize) -> Option<RegionDescriptor>;
}

impl<'q, Q: RegionQuery + ?Sized> RegionQuery for &'q Q {
    fn query_region(&self, address: usize) -> Option<RegionDescriptor> {
        (**self).query_region(address)
    }
}

impl<Q: RegionQuery + ?Sized> RegionQuery for Box<Q> {
    fn query_region(&self, address: usize) -> Option<RegionDescriptor> {
        (**self).query_region(address)
    }
}

/// A backend for targets with no way to describe memory. Every query fails.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Unsupported;

impl RegionQuery for Unsupported {
    fn query_region(&self, _address: usize) -> Option<RegionDescriptor> {
        None
    }
}

/// A fixed table of regions.
///
/// Useful for replaying a snapshot of another process' memory map, or for
/// describing memory that the operating system does not know about.
///
/// Queries return the whole table entry containing the address, not the part
/// from the address' page on. Insert entries at the granularity queries
/// should see.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Regions {
    regions: Vec<RegionDescriptor>,
}

impl Regions {
    /// Create an empty region table.
    pub fn new() -> Regions {
        Regions::default()
    }

    /// Add a region to the table.
    ///
    /// Regions are kept sorted by base. Overlapping regions are not
    /// rejected; queries return the region with the highest base at or below
    /// the address.
    pub fn insert(&mut self, region: RegionDescriptor) {
        let index = self
            .regions
            .partition_point(|r| r.base() <= region.base());
        self.regions.insert(index, region);
    }

    /// Get the regions in this table, sorted by base.
    pub fn regions(&self) -> &[RegionDescriptor] {
        &self.regions
    }
}

impl FromIterator<RegionDescriptor> for Regions {
    fn from_iter<I: IntoIterator<Item = RegionDescriptor>>(iter: I) -> Regions {
        let mut regions: Vec<RegionDescriptor> = iter.into_iter().collect();
        regions.sort_by_key(|r| r.base());
        Regions { regions }
    }
}

impl RegionQuery for Regions {
    fn query_region(&self, address: usize) -> Option<RegionDescriptor> {
        let index = self.regions.partition_point(|r| r.base() <= address);
        let region = self.regions.get(index.checked_sub(1)?)?;
        if region.contains(address) {
            Some(region.clone())
        } else {
            None
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
static HOST: ProcMaps = ProcMaps::new();

#[cfg(windows)]
static HOST: windows::VirtualQuery = windows::VirtualQuery;

#[cfg(not(any(target_os = "linux", target_os = "android", windows)))]
static HOST: Unsupported = Unsupported;

/// The region backend for the platform this crate was built for.
pub fn host() -> &'static dyn RegionQuery {
    &HOST
}

/// Returns `true` if the host backend can describe memory on this platform.
pub fn host_supported() -> bool {
    cfg!(any(target_os = "linux", target_os = "android", windows))
}
