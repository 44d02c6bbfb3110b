//! A region backend wrapping `VirtualQuery`.

use crate::region::{Protection, RegionDescriptor, RegionQuery, RegionState};
use log::trace;
use std::mem;
use windows_sys::Win32::System::Memory::{
    VirtualQuery as virtual_query, MEMORY_BASIC_INFORMATION, MEM_COMMIT, MEM_FREE, MEM_RESERVE,
};

/// Region backend for Windows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VirtualQuery;

impl RegionQuery for VirtualQuery {
    fn query_region(&self, address: usize) -> Option<RegionDescriptor> {
        let mut mbi: MEMORY_BASIC_INFORMATION = unsafe { mem::zeroed() };
        let written = unsafe {
            virtual_query(
                address as *const _,
                &mut mbi,
                mem::size_of::<MEMORY_BASIC_INFORMATION>(),
            )
        };
        if written == 0 {
            trace!("VirtualQuery failed for 0x{:x}", address);
            return None;
        }

        let state = match mbi.State {
            MEM_COMMIT => RegionState::Commit,
            MEM_RESERVE => RegionState::Reserve,
            MEM_FREE => RegionState::Free,
            state => {
                trace!("Unknown region state 0x{:x} at 0x{:x}", state, address);
                return None;
            }
        };

        Some(RegionDescriptor::new(
            mbi.BaseAddress as usize,
            mbi.RegionSize,
            state,
            Protection::from_bits_truncate(mbi.Protect),
        ))
    }
}
