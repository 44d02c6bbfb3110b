//! The universal address value.
//!
//! An `Address` is a machine-width unsigned integer which may be treated as
//! a pointer. Anything integral or pointer-like converts into an `Address` by
//! reinterpreting its bits, and an `Address` converts back out the same way.
//! Construction never validates the address. Whether memory at an address may
//! be touched is a separate, explicit question answered by the `region`
//! module, see `Address::is_readable` and friends.
//!
//! ```
//! use uniaddr::Address;
//!
//! let a = Address::from(0x1000u32);
//! assert_eq!(a + 0x10, 0x1010);
//! assert_eq!(a.to::<u16>(), 0x1000);
//! ```

mod access;
mod introspect;
mod ops;

pub use self::access::resolve_relative;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ptr::NonNull;

/// A machine address with value semantics.
///
/// Copying an `Address` copies the integer, never the memory it designates.
#[derive(Clone, Copy, Default, Deserialize, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Address(usize);

impl Address {
    /// Width of a native address in bytes.
    pub const SIZE: usize = std::mem::size_of::<usize>();

    /// Width of a native address in bits.
    pub const BITS: u32 = usize::BITS;

    /// Create an `Address` from a native-width integer.
    pub const fn new(value: usize) -> Address {
        Address(value)
    }

    /// The null address.
    pub const fn null() -> Address {
        Address(0)
    }

    /// Create an `Address` from the bit pattern of any `IntoAddress` value.
    pub fn from_bits<T: IntoAddress>(value: T) -> Address {
        Address(value.into_address_bits())
    }

    /// Get the raw integer held by this `Address`.
    pub const fn value(self) -> usize {
        self.0
    }

    /// Returns `true` if this address is zero.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Width of a native address in bytes.
    pub const fn size() -> usize {
        Address::SIZE
    }

    /// Reinterpret the address integer as `T`, without dereferencing.
    pub fn to<T: FromAddress>(self) -> T {
        T::from_address_bits(self.0)
    }

    /// Same as `to`. Named for readers coming from `as`-style casts.
    pub fn cast<T: FromAddress>(self) -> T {
        self.to()
    }
}

/// Values whose bit pattern can be taken as an address.
///
/// Integers follow the semantics of an `as usize` cast: wider values
/// truncate, negative values sign-extend. Floats contribute their IEEE-754
/// bits. Pointers contribute their address and drop any metadata.
pub trait IntoAddress {
    fn into_address_bits(self) -> usize;
}

/// Values which can be produced from the bit pattern of an address.
pub trait FromAddress {
    fn from_address_bits(bits: usize) -> Self;
}

macro_rules! address_integer {
    ($($t:ty),*) => {
        $(
            impl IntoAddress for $t {
                fn into_address_bits(self) -> usize {
                    self as usize
                }
            }

            impl FromAddress for $t {
                fn from_address_bits(bits: usize) -> $t {
                    bits as $t
                }
            }

            impl From<$t> for Address {
                fn from(value: $t) -> Address {
                    Address(value.into_address_bits())
                }
            }

            impl From<Address> for $t {
                fn from(address: Address) -> $t {
                    <$t>::from_address_bits(address.0)
                }
            }
        )*
    }
}

address_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl IntoAddress for Address {
    fn into_address_bits(self) -> usize {
        self.0
    }
}

impl FromAddress for Address {
    fn from_address_bits(bits: usize) -> Address {
        Address(bits)
    }
}

impl IntoAddress for bool {
    fn into_address_bits(self) -> usize {
        self as usize
    }
}

impl FromAddress for bool {
    fn from_address_bits(bits: usize) -> bool {
        bits != 0
    }
}

impl From<bool> for Address {
    fn from(value: bool) -> Address {
        Address(value.into_address_bits())
    }
}

impl IntoAddress for char {
    fn into_address_bits(self) -> usize {
        self as usize
    }
}

impl From<char> for Address {
    fn from(value: char) -> Address {
        Address(value.into_address_bits())
    }
}

impl IntoAddress for f32 {
    fn into_address_bits(self) -> usize {
        self.to_bits() as usize
    }
}

impl FromAddress for f32 {
    fn from_address_bits(bits: usize) -> f32 {
        f32::from_bits(bits as u32)
    }
}

impl From<f32> for Address {
    fn from(value: f32) -> Address {
        Address(value.into_address_bits())
    }
}

impl IntoAddress for f64 {
    fn into_address_bits(self) -> usize {
        self.to_bits() as usize
    }
}

impl FromAddress for f64 {
    fn from_address_bits(bits: usize) -> f64 {
        f64::from_bits(bits as u64)
    }
}

impl From<f64> for Address {
    fn from(value: f64) -> Address {
        Address(value.into_address_bits())
    }
}

impl<T: ?Sized> IntoAddress for *const T {
    fn into_address_bits(self) -> usize {
        self.cast::<()>() as usize
    }
}

impl<T: ?Sized> IntoAddress for *mut T {
    fn into_address_bits(self) -> usize {
        self.cast::<()>() as usize
    }
}

impl<T: ?Sized> IntoAddress for NonNull<T> {
    fn into_address_bits(self) -> usize {
        self.as_ptr().into_address_bits()
    }
}

impl<T: ?Sized> IntoAddress for &T {
    fn into_address_bits(self) -> usize {
        (self as *const T).into_address_bits()
    }
}

impl<T: ?Sized> IntoAddress for &mut T {
    fn into_address_bits(self) -> usize {
        (self as *mut T).into_address_bits()
    }
}

impl<T> FromAddress for *const T {
    fn from_address_bits(bits: usize) -> *const T {
        bits as *const T
    }
}

impl<T> FromAddress for *mut T {
    fn from_address_bits(bits: usize) -> *mut T {
        bits as *mut T
    }
}

impl<T: ?Sized> From<*const T> for Address {
    fn from(pointer: *const T) -> Address {
        Address(pointer.into_address_bits())
    }
}

impl<T: ?Sized> From<*mut T> for Address {
    fn from(pointer: *mut T) -> Address {
        Address(pointer.into_address_bits())
    }
}

impl<T: ?Sized> From<NonNull<T>> for Address {
    fn from(pointer: NonNull<T>) -> Address {
        Address(pointer.into_address_bits())
    }
}

impl<T: ?Sized> From<&T> for Address {
    fn from(reference: &T) -> Address {
        Address(reference.into_address_bits())
    }
}

impl<T: ?Sized> From<&mut T> for Address {
    fn from(reference: &mut T) -> Address {
        Address(reference.into_address_bits())
    }
}

impl<T> From<Address> for *const T {
    fn from(address: Address) -> *const T {
        address.as_ptr()
    }
}

impl<T> From<Address> for *mut T {
    fn from(address: Address) -> *mut T {
        address.as_mut_ptr()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address(0x{:x})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
