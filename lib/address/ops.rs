//! Operators over `Address`.
//!
//! Every binary operator accepts any `IntoAddress` operand, converts it to the
//! native width, and applies the unsigned integer operation. Arithmetic wraps
//! at the native width. Division and remainder by zero panic.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use super::{Address, IntoAddress};

fn shl(value: usize, amount: usize) -> usize {
    u32::try_from(amount)
        .ok()
        .and_then(|amount| value.checked_shl(amount))
        .unwrap_or(0)
}

fn shr(value: usize, amount: usize) -> usize {
    u32::try_from(amount)
        .ok()
        .and_then(|amount| value.checked_shr(amount))
        .unwrap_or(0)
}

fn and(lhs: usize, rhs: usize) -> usize {
    lhs & rhs
}

fn or(lhs: usize, rhs: usize) -> usize {
    lhs | rhs
}

fn xor(lhs: usize, rhs: usize) -> usize {
    lhs ^ rhs
}

macro_rules! address_operator {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:path) => {
        impl<T: IntoAddress> $trait<T> for Address {
            type Output = Address;

            fn $method(self, rhs: T) -> Address {
                Address($op(self.0, T::into_address_bits(rhs)))
            }
        }

        impl<T: IntoAddress> $assign_trait<T> for Address {
            fn $assign_method(&mut self, rhs: T) {
                self.0 = $op(self.0, T::into_address_bits(rhs));
            }
        }
    };
}

address_operator!(Add, add, AddAssign, add_assign, usize::wrapping_add);
address_operator!(Sub, sub, SubAssign, sub_assign, usize::wrapping_sub);
address_operator!(Mul, mul, MulAssign, mul_assign, usize::wrapping_mul);
address_operator!(Div, div, DivAssign, div_assign, usize::wrapping_div);
address_operator!(Rem, rem, RemAssign, rem_assign, usize::wrapping_rem);
address_operator!(Shl, shl, ShlAssign, shl_assign, shl);
address_operator!(Shr, shr, ShrAssign, shr_assign, shr);
address_operator!(BitAnd, bitand, BitAndAssign, bitand_assign, and);
address_operator!(BitOr, bitor, BitOrAssign, bitor_assign, or);
address_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, xor);

/// Bitwise complement.
impl Not for Address {
    type Output = Address;

    fn not(self) -> Address {
        Address(!self.0)
    }
}

impl Address {
    /// Step this address forward by one, then return the new value.
    pub fn pre_increment(&mut self) -> Address {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    /// Step this address forward by one, returning the value it held before.
    pub fn post_increment(&mut self) -> Address {
        let previous = *self;
        self.0 = self.0.wrapping_add(1);
        previous
    }

    /// Step this address back by one, then return the new value.
    pub fn pre_decrement(&mut self) -> Address {
        self.0 = self.0.wrapping_sub(1);
        *self
    }

    /// Step this address back by one, returning the value it held before.
    pub fn post_decrement(&mut self) -> Address {
        let previous = *self;
        self.0 = self.0.wrapping_sub(1);
        previous
    }

    /// Move this address by a signed byte count.
    pub fn offset(self, count: isize) -> Address {
        Address(self.0.wrapping_add_signed(count))
    }

    /// Returns `true` if this address is a multiple of `alignment`.
    ///
    /// `alignment` must be a power of two.
    pub fn is_aligned(self, alignment: usize) -> bool {
        debug_assert!(alignment.is_power_of_two());
        self.0 & (alignment - 1) == 0
    }

    /// Round this address down to a multiple of `alignment`.
    ///
    /// `alignment` must be a power of two.
    pub fn align_down(self, alignment: usize) -> Address {
        debug_assert!(alignment.is_power_of_two());
        Address(self.0 & !(alignment - 1))
    }

    /// Round this address up to a multiple of `alignment`, wrapping at the
    /// top of the address space.
    ///
    /// `alignment` must be a power of two.
    pub fn align_up(self, alignment: usize) -> Address {
        debug_assert!(alignment.is_power_of_two());
        Address(self.0.wrapping_add(alignment - 1) & !(alignment - 1))
    }
}

impl<T: IntoAddress + Copy> PartialEq<T> for Address {
    fn eq(&self, other: &T) -> bool {
        self.0 == T::into_address_bits(*other)
    }
}

impl Eq for Address {}

impl<T: IntoAddress + Copy> PartialOrd<T> for Address {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        Some(self.0.cmp(&T::into_address_bits(*other)))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Address) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod ops_tests {
    use crate::Address;

    #[test]
    fn arithmetic() {
        let address = Address::new(0x1000);

        assert_eq!(address + 0x20, 0x1020);
        assert_eq!(address - 0x20, 0xFE0);
        assert_eq!(address * 2, 0x2000);
        assert_eq!(address / 0x10, 0x100);
        assert_eq!(address % 0x300, 0x100);
        assert_eq!(address + Address::new(1), 0x1001);
    }

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(Address::new(usize::MAX) + 1u8, 0);
        assert_eq!(Address::null() - 1, usize::MAX);
        assert_eq!(Address::new(usize::MAX) * 2, usize::MAX - 1);

        // a negative operand is its two's complement bit pattern
        assert_eq!(Address::new(0x1000) + -0x10i32, 0xFF0);
    }

    #[test]
    #[should_panic]
    fn divide_by_zero() {
        let _ = Address::new(0x1000) / 0;
    }

    #[test]
    fn compound_assignment() {
        let mut address = Address::new(0x10);

        address += 0x10;
        assert_eq!(address, 0x20);
        address -= 0x8;
        assert_eq!(address, 0x18);
        address *= 4;
        assert_eq!(address, 0x60);
        address /= 3;
        assert_eq!(address, 0x20);
        address %= 0x18;
        assert_eq!(address, 0x8);
        address <<= 4;
        assert_eq!(address, 0x80);
        address >>= 1;
        assert_eq!(address, 0x40);
        address |= 0x0F;
        assert_eq!(address, 0x4F);
        address &= 0xF0;
        assert_eq!(address, 0x40);
        address ^= 0x41;
        assert_eq!(address, 0x01);
    }

    #[test]
    fn bitwise() {
        let address = Address::new(0xF0F0);

        assert_eq!(address & 0xFF00, 0xF000);
        assert_eq!(address | 0x000F, 0xF0FF);
        assert_eq!(address ^ 0xFFFF, 0x0F0F);
        assert_eq!(!address, !0xF0F0usize);
        assert_eq!(!Address::null(), usize::MAX);
        assert_eq!(address << 4, 0xF0F00);
        assert_eq!(address >> 4, 0xF0F);
    }

    #[test]
    fn oversized_shift_clears() {
        let address = Address::new(usize::MAX);

        assert_eq!(address << Address::BITS, 0);
        assert_eq!(address >> Address::BITS, 0);
        assert_eq!(address << (Address::BITS - 1), 1usize << (Address::BITS - 1));
        assert_eq!(address >> u64::MAX, 0);
    }

    #[test]
    fn increment_decrement() {
        let mut address = Address::new(0x100);
        assert_eq!(address.pre_increment(), 0x101);
        assert_eq!(address, 0x101);

        let mut address = Address::new(0x100);
        assert_eq!(address.post_increment(), 0x100);
        assert_eq!(address, 0x101);

        let mut address = Address::new(0x100);
        assert_eq!(address.pre_decrement(), 0xFF);
        assert_eq!(address, 0xFF);

        let mut address = Address::new(0x100);
        assert_eq!(address.post_decrement(), 0x100);
        assert_eq!(address, 0xFF);

        let mut address = Address::null();
        assert_eq!(address.pre_decrement(), usize::MAX);
    }

    #[test]
    fn comparison() {
        let address = Address::new(0x500);

        assert!(address == 0x500);
        assert!(address != 0x501);
        assert!(address < 0x501u64);
        assert!(address <= 0x500u16);
        assert!(address > 0x4FFi64);
        assert!(address >= Address::new(0x500));

        // operands compare through their unsigned bit pattern
        assert!(address < -1i32);

        let mut addresses = vec![Address::new(3), Address::new(1), Address::new(2)];
        addresses.sort();
        assert_eq!(addresses, vec![Address::new(1), Address::new(2), Address::new(3)]);
    }

    #[test]
    fn compares_by_value() {
        let address = Address::new(0x500);
        let same = address;

        assert!(address == address);
        assert!(address == same);
        assert!(address == 0x500usize);
        assert!(!(address < address));
        assert!(address <= address);
        assert!((address + 1) - 1 == address);
        assert_eq!(address.partial_cmp(&0x501u32), Some(std::cmp::Ordering::Less));
    }

    #[test]
    fn hash_set_lookup() {
        use std::collections::{HashMap, HashSet};

        let mut seen = HashSet::new();
        seen.insert(Address::new(0x401000));
        seen.insert(Address::new(0x401000) + 0x10);

        assert!(seen.contains(&Address::new(0x401000)));
        assert!(seen.contains(&Address::new(0x401010)));
        assert!(!seen.contains(&Address::new(0x401020)));
        assert!(!seen.insert(Address::new(0x401010)));
        assert_eq!(seen.len(), 2);

        let mut names = HashMap::new();
        names.insert(Address::new(0x1000), "entry");
        assert_eq!(names.get(&Address::new(0x1000)), Some(&"entry"));
    }

    #[test]
    fn alignment() {
        let address = Address::new(0x1234);

        assert!(!address.is_aligned(0x1000));
        assert!(address.is_aligned(4));
        assert_eq!(address.align_down(0x1000), 0x1000);
        assert_eq!(address.align_up(0x1000), 0x2000);
        assert_eq!(Address::new(0x2000).align_up(0x1000), 0x2000);
        assert_eq!(address.offset(-0x34), 0x1200);
        assert_eq!(address.offset(0x10), 0x1244);
    }
}
