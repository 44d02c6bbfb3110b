//! Reading and writing memory through an `Address`.
//!
//! Nothing here checks that the address is mapped. Every dereferencing
//! accessor is `unsafe`, with the same contract as a raw pointer read or
//! write. Callers who need a check should ask the region introspector first,
//! keeping in mind that the answer may be stale by the time they act on it.

use std::ptr;

use super::{Address, IntoAddress};

/// Compute the target of an instruction-relative operand.
///
/// The target is `address + instruction_len + displacement`, wrapping at the
/// native width. `displacement` contributes its bits the same way any other
/// `IntoAddress` operand does, so signed displacements resolve backward.
pub fn resolve_relative<T: IntoAddress>(
    address: Address,
    instruction_len: usize,
    displacement: T,
) -> Address {
    address + instruction_len + displacement
}

impl Address {
    /// Reinterpret this address as a pointer to `T`.
    pub fn as_ptr<T>(self) -> *const T {
        self.0 as *const T
    }

    /// Reinterpret this address as a mutable pointer to `T`.
    pub fn as_mut_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }

    /// Read a `T` from this address.
    ///
    /// The read does not need to be aligned.
    ///
    /// # Safety
    ///
    /// This address must refer to at least `size_of::<T>()` readable bytes
    /// holding a valid `T`.
    pub unsafe fn get<T: Copy>(self) -> T {
        ptr::read_unaligned(self.as_ptr::<T>())
    }

    /// Write `value` to this address.
    ///
    /// The previous contents are overwritten without being dropped. The write
    /// does not need to be aligned.
    ///
    /// # Safety
    ///
    /// This address must refer to at least `size_of::<T>()` writeable bytes.
    pub unsafe fn set<T>(self, value: T) {
        ptr::write_unaligned(self.as_mut_ptr::<T>(), value)
    }

    /// Read a block of `N` bytes from this address.
    ///
    /// # Safety
    ///
    /// This address must refer to at least `N` readable bytes.
    pub unsafe fn get_bytes<const N: usize>(self) -> [u8; N] {
        self.get::<[u8; N]>()
    }

    /// Copy a block of `N` bytes to this address.
    ///
    /// # Safety
    ///
    /// This address must refer to at least `N` writeable bytes, which must
    /// not overlap `bytes`.
    pub unsafe fn set_bytes<const N: usize>(self, bytes: &[u8; N]) {
        ptr::copy_nonoverlapping(bytes.as_ptr(), self.as_mut_ptr::<u8>(), N)
    }

    /// Resolve an instruction-relative operand.
    ///
    /// Reads a `T` displacement `offset_to_read` bytes past this address and
    /// returns `self + instruction_len + displacement`. For a 5-byte x86
    /// `call rel32` at this address, the target is
    /// `relative_addr::<i32>(1, 5)`.
    ///
    /// # Safety
    ///
    /// `self + offset_to_read` must refer to at least `size_of::<T>()`
    /// readable bytes.
    pub unsafe fn relative_addr<T: IntoAddress + Copy>(
        self,
        offset_to_read: usize,
        instruction_len: usize,
    ) -> Address {
        let displacement: T = (self + offset_to_read).get();
        resolve_relative(self, instruction_len, displacement)
    }

    /// Resolve an instruction-relative operand in place.
    ///
    /// # Safety
    ///
    /// See `relative_addr`.
    pub unsafe fn to_relative_addr<T: IntoAddress + Copy>(
        &mut self,
        offset_to_read: usize,
        instruction_len: usize,
    ) {
        *self = self.relative_addr::<T>(offset_to_read, instruction_len);
    }

    /// `relative_addr` with an unsigned 32-bit displacement.
    ///
    /// On 64-bit targets an unsigned displacement does not reach backward.
    /// Use `relative_addr::<i32>` when the encoding is signed.
    ///
    /// # Safety
    ///
    /// See `relative_addr`.
    pub unsafe fn rel32(self, offset_to_read: usize, instruction_len: usize) -> Address {
        self.relative_addr::<u32>(offset_to_read, instruction_len)
    }
}
