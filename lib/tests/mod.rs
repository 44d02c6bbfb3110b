use crate::address::resolve_relative;
use crate::region::{Protection, RegionDescriptor, RegionState, Regions};
use crate::Address;
use proptest::prelude::*;

fn region_table(base: usize, size: usize, protection: Protection) -> Regions {
    vec![RegionDescriptor::new(
        base,
        size,
        RegionState::Commit,
        protection,
    )]
    .into_iter()
    .collect()
}

proptest! {
    #[test]
    fn integer_round_trip(n in any::<u64>(), m in any::<i32>(), b in any::<u8>()) {
        prop_assert_eq!(Address::from(n as usize).to::<usize>(), n as usize);
        prop_assert_eq!(Address::from(m).to::<i32>(), m);
        prop_assert_eq!(u8::from(Address::from(b)), b);
    }

    #[test]
    fn add_sub_inverse(a in any::<usize>(), k in any::<usize>()) {
        let a = Address::new(a);
        prop_assert_eq!((a + k) - k, a);
        prop_assert_eq!((a - k) + k, a);
    }

    #[test]
    fn shift_inverse(a in any::<usize>(), k in 0..usize::BITS) {
        // clear the bits that a left shift by k would discard
        let a = Address::new(a.checked_shr(k).unwrap_or(0));
        prop_assert_eq!((a << k) >> k, a);
    }

    #[test]
    fn increment_semantics(a in any::<usize>()) {
        let mut pre = Address::new(a);
        let mut post = Address::new(a);

        prop_assert_eq!(pre.pre_increment(), Address::new(a) + 1);
        prop_assert_eq!(post.post_increment(), Address::new(a));
        prop_assert_eq!(pre, post);

        prop_assert_eq!(pre.pre_decrement(), Address::new(a));
        prop_assert_eq!(post.post_decrement(), Address::new(a) + 1);
        prop_assert_eq!(pre, post);
    }

    #[test]
    fn logical_not(a in 1..usize::MAX) {
        prop_assert!(!Address::new(a).is_null());
    }

    #[test]
    fn relative_target(displacement in any::<i32>(), offset in 0usize..8, length in 1usize..16) {
        let mut code = [0u8; 16];
        code[offset..offset + 4].copy_from_slice(&displacement.to_ne_bytes());
        let address = Address::from(code.as_ptr());

        let target = unsafe { address.relative_addr::<i32>(offset, length) };
        prop_assert_eq!(target, address + length + displacement);
        prop_assert_eq!(target, resolve_relative(address, length, displacement));
    }

    #[test]
    fn region_size_threshold(base in 1usize..0x1000_0000, size in 1usize..0x10_0000) {
        let regions = region_table(base, size, Protection::READWRITE);
        let address = Address::new(base);

        prop_assert!(address.is_valid_in(&regions, size));
        prop_assert!(!address.is_valid_in(&regions, size + 1));
        prop_assert!(address.is_readable_in(&regions, size));
        prop_assert!(address.is_writeable_in(&regions, size));
        prop_assert_eq!(address.region_size_in(&regions), size);
    }
}

#[test]
fn null_is_negative() {
    assert!(Address::null().is_null());

    let regions = region_table(0, 0x1000, Protection::READWRITE);
    let null = Address::null();
    assert!(!null.is_valid_in(&regions, 1));
    assert!(!null.is_readable_in(&regions, 1));
    assert!(!null.is_writeable_in(&regions, 1));
    assert_eq!(null.region_size_in(&regions), 0);

    // the same region answers for any other address in it
    assert!(Address::new(1).is_valid_in(&regions, 1));
}

#[test]
fn check_then_access() {
    let mut buffer = [0u8; 64];
    let address = Address::from(buffer.as_mut_ptr());
    let regions = region_table(address.value(), buffer.len(), Protection::READWRITE);

    if address.is_writeable_in(&regions, 8) {
        unsafe { address.set(0x0102030405060708u64) };
    }
    if address.is_readable_in(&regions, 8) {
        assert_eq!(unsafe { address.get::<u64>() }, 0x0102030405060708);
    }
    assert_eq!(&buffer[..8], &0x0102030405060708u64.to_ne_bytes());
}
