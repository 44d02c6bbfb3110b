//! A region backend reading `/proc/self/maps`.
//!
//! Each line of the maps file describes one mapping:
//!
//! ```text
//! 00400000-00452000 r-xp 00000000 08:02 173521      /usr/bin/dbus-daemon
//! ```
//!
//! Only the address range and the permission column are used. Every mapping
//! listed is committed. A query reports the mapping from the page containing
//! the queried address to its end, as `VirtualQuery` does. A mapping with none of `r`, `w` or `x` is
//! `Protection::NOACCESS`, which is how guard pages appear on Linux.

use crate::region::{Protection, RegionDescriptor, RegionQuery, RegionState};
use crate::Error;
use log::{trace, warn};
use std::fs;
use std::path::{Path, PathBuf};

const SELF_MAPS: &str = "/proc/self/maps";

/// Granularity of query results. Mappings are aligned to the system page
/// size, which is a multiple of this.
pub const PAGE_SIZE: usize = 0x1000;

/// Region backend for Linux and Android.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProcMaps {
    path: Option<PathBuf>,
}

impl ProcMaps {
    /// Read the maps of the current process.
    pub const fn new() -> ProcMaps {
        ProcMaps { path: None }
    }

    /// Read maps in the `/proc/<pid>/maps` format from the given file.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> ProcMaps {
        ProcMaps {
            path: Some(path.into()),
        }
    }

    /// The file this backend reads.
    pub fn path(&self) -> &Path {
        match self.path {
            Some(ref path) => path.as_path(),
            None => Path::new(SELF_MAPS),
        }
    }

    /// Read and parse every region in the maps file.
    pub fn regions(&self) -> Result<Vec<RegionDescriptor>, Error> {
        parse_maps(&fs::read_to_string(self.path())?)
    }

    /// Find the mapping containing `address`, reading the maps file a line at
    /// a time and stopping at the first match. The result starts at the page
    /// containing `address`.
    fn find(&self, address: usize) -> Result<Option<RegionDescriptor>, Error> {
        let maps = fs::read_to_string(self.path())?;
        for (index, line) in maps.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let region = parse_line(index + 1, line)?;
            if region.contains(address) {
                return Ok(Some(region.from_page(address, PAGE_SIZE)));
            }
            // maps are sorted by start address
            if region.base() > address {
                break;
            }
        }
        Ok(None)
    }
}

impl RegionQuery for ProcMaps {
    fn query_region(&self, address: usize) -> Option<RegionDescriptor> {
        match self.find(address) {
            Ok(Some(region)) => Some(region),
            Ok(None) => {
                trace!("0x{:x} is not mapped", address);
                None
            }
            Err(e) => {
                warn!("Could not read {}: {}", self.path().display(), e);
                None
            }
        }
    }
}

/// Parse the contents of a maps file.
pub fn parse_maps(maps: &str) -> Result<Vec<RegionDescriptor>, Error> {
    maps.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn malformed(line: usize, reason: &str) -> Error {
    Error::MalformedRegionMap {
        line,
        reason: reason.to_string(),
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<RegionDescriptor, Error> {
    let mut columns = line.split_whitespace();

    let range = columns
        .next()
        .ok_or_else(|| malformed(line_number, "missing address range"))?;
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| malformed(line_number, "address range has no '-'"))?;
    let start = usize::from_str_radix(start, 16)?;
    let end = usize::from_str_radix(end, 16)?;
    if end < start {
        return Err(malformed(line_number, "address range ends before it starts"));
    }

    let permissions = columns
        .next()
        .ok_or_else(|| malformed(line_number, "missing permissions"))?;
    let protection = parse_permissions(permissions)
        .ok_or_else(|| malformed(line_number, "unrecognised permissions"))?;

    Ok(RegionDescriptor::new(
        start,
        end - start,
        RegionState::Commit,
        protection,
    ))
}

fn parse_permissions(permissions: &str) -> Option<Protection> {
    let permissions = permissions.as_bytes();
    if permissions.len() != 4 {
        return None;
    }

    let read = match permissions[0] {
        b'r' => true,
        b'-' => false,
        _ => return None,
    };
    let write = match permissions[1] {
        b'w' => true,
        b'-' => false,
        _ => return None,
    };
    let execute = match permissions[2] {
        b'x' => true,
        b'-' => false,
        _ => return None,
    };
    let shared = match permissions[3] {
        b's' => true,
        b'p' => false,
        _ => return None,
    };

    // Linux has no write-only pages, writeable implies readable. Private
    // writeable mappings are copy-on-write.
    Some(match (read || write, write, execute) {
        (false, _, false) => Protection::NOACCESS,
        (false, _, true) => Protection::EXECUTE,
        (true, false, false) => Protection::READONLY,
        (true, false, true) => Protection::EXECUTE_READ,
        (true, true, false) if shared => Protection::READWRITE,
        (true, true, false) => Protection::WRITECOPY,
        (true, true, true) if shared => Protection::EXECUTE_READWRITE,
        (true, true, true) => Protection::EXECUTE_WRITECOPY,
    })
}
