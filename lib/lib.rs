//! A universal address value.
//!
//! `uniaddr` provides `Address`, a machine-width integer which can stand in
//! for any integral or pointer value. An `Address` supports:
//!
//! * Pointer arithmetic and bit manipulation with wrapping, unsigned
//!   semantics, against operands of any integral or pointer type.
//! * Unchecked, typed reads and writes through the address. These are
//!   `unsafe`, exactly as raw pointer accesses are.
//! * Resolution of instruction-relative operands, as found in disassembled
//!   machine code.
//! * Advisory queries of the operating system's memory map, through the
//!   `region` module, to ask whether the address is currently committed,
//!   readable or writeable.
//!
//! ```
//! use uniaddr::Address;
//!
//! let value = 0x1234u32;
//! let address = Address::from(&value);
//!
//! if address.is_readable(4) {
//!     assert_eq!(unsafe { address.get::<u32>() }, 0x1234);
//! }
//! ```
//!
//! An `Address` never owns the memory it designates, and region queries are
//! not atomic with later accesses. A region reported readable may be
//! unmapped by another thread before it is read.

pub mod address;
pub mod error;
pub mod region;
#[cfg(test)]
mod tests;

pub use crate::address::{Address, FromAddress, IntoAddress};
pub use crate::error::Error;
