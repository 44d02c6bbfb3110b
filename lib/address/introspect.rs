//! Asking whether memory behind an `Address` may be accessed.
//!
//! Each predicate has two forms. The plain form consults `region::host()`.
//! The `_in` form takes any `RegionQuery`. The null address is rejected
//! before any backend is consulted.
//!
//! `min_size` is the number of bytes the region must hold from its reported
//! base. Pass `Address::SIZE` to ask whether a pointer-sized value fits,
//! which is the usual check before following a pointer.

use log::trace;

use super::Address;
use crate::region::{self, RegionDescriptor, RegionQuery};

impl Address {
    /// Describe the region containing this address, or `None` for the null
    /// address or an address the backend cannot describe.
    pub fn region_in<Q: RegionQuery + ?Sized>(self, query: &Q) -> Option<RegionDescriptor> {
        if self.is_null() {
            trace!("Not querying the null address");
            return None;
        }
        let region = query.query_region(self.0);
        if region.is_none() {
            trace!("No region found for {}", self);
        }
        region
    }

    /// Describe the region containing this address using the host backend.
    pub fn region(self) -> Option<RegionDescriptor> {
        self.region_in(region::host())
    }

    /// Returns `true` if this address is in a committed region of at least
    /// `min_size` bytes which is neither no-access nor a guard region.
    pub fn is_valid_in<Q: RegionQuery + ?Sized>(self, query: &Q, min_size: usize) -> bool {
        self.region_in(query)
            .map(|region| region.is_accessible(min_size))
            .unwrap_or(false)
    }

    /// `is_valid_in` against the host backend.
    ///
    /// `address.is_valid(Address::SIZE)` checks room for one pointer.
    pub fn is_valid(self, min_size: usize) -> bool {
        self.is_valid_in(region::host(), min_size)
    }

    /// Returns `true` if this address is valid and its region permits reads.
    pub fn is_readable_in<Q: RegionQuery + ?Sized>(self, query: &Q, min_size: usize) -> bool {
        self.region_in(query)
            .map(|region| region.is_readable(min_size))
            .unwrap_or(false)
    }

    /// `is_readable_in` against the host backend.
    ///
    /// `address.is_readable(Address::SIZE)` checks that a pointer can be read.
    pub fn is_readable(self, min_size: usize) -> bool {
        self.is_readable_in(region::host(), min_size)
    }

    /// Returns `true` if this address is valid and its region permits writes.
    pub fn is_writeable_in<Q: RegionQuery + ?Sized>(self, query: &Q, min_size: usize) -> bool {
        self.region_in(query)
            .map(|region| region.is_writeable(min_size))
            .unwrap_or(false)
    }

    /// `is_writeable_in` against the host backend.
    ///
    /// `address.is_writeable(Address::SIZE)` checks that a pointer can be
    /// written.
    pub fn is_writeable(self, min_size: usize) -> bool {
        self.is_writeable_in(region::host(), min_size)
    }

    /// Size of the region containing this address, or 0 if there is none.
    pub fn region_size_in<Q: RegionQuery + ?Sized>(self, query: &Q) -> usize {
        self.region_in(query).map(|region| region.size()).unwrap_or(0)
    }

    /// `region_size_in` against the host backend.
    pub fn region_size(self) -> usize {
        self.region_size_in(region::host())
    }
}
