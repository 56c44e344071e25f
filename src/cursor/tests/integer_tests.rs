//! Tests for signed and unsigned integer conversion

use super::*;
use crate::ErrorKind;

#[test]
fn test_unsigned_rejects_minus_sign() {
    // strtoul-style conversion would wrap these into huge values
    for text in ["-1", "-0", "-18446744073709551615"] {
        assert_eq!(blank_cursor(text).read_u16(), Err(ErrorKind::OutOfRange));
        assert_eq!(blank_cursor(text).read_u32(), Err(ErrorKind::OutOfRange));
        assert_eq!(blank_cursor(text).read_u64(), Err(ErrorKind::OutOfRange));
    }
}

#[test]
fn test_unsigned_first_character() {
    assert_eq!(blank_cursor("+5").read_u32(), Ok(5));
    assert_eq!(blank_cursor(".5").read_u32(), Err(ErrorKind::InvalidFormat));
    assert_eq!(blank_cursor("abc").read_u32(), Err(ErrorKind::InvalidFormat));
    assert_eq!(blank_cursor("+-5").read_u32(), Err(ErrorKind::InvalidFormat));
}

#[test]
fn test_bounds_are_inclusive() {
    let mut cursor = blank_cursor("1 100 0 101");
    assert_eq!(cursor.read_u32_in(1, 100), Ok(1));
    assert_eq!(cursor.read_u32_in(1, 100), Ok(100));
    assert_eq!(cursor.read_u32_in(1, 100), Err(ErrorKind::OutOfRange));
    cursor.skip().unwrap();
    assert_eq!(cursor.read_u32_in(1, 100), Err(ErrorKind::OutOfRange));

    let mut cursor = blank_cursor("-3000 4000 -3001 4001");
    assert_eq!(cursor.read_i16_in(-3000, 4000), Ok(-3000));
    assert_eq!(cursor.read_i16_in(-3000, 4000), Ok(4000));
    assert_eq!(cursor.read_i16_in(-3000, 4000), Err(ErrorKind::OutOfRange));
    cursor.skip().unwrap();
    assert_eq!(cursor.read_i16_in(-3000, 4000), Err(ErrorKind::OutOfRange));
    assert_eq!(cursor.column(), 3);
}

#[test]
fn test_natural_ranges() {
    assert_eq!(blank_cursor("2147483647").read_i32(), Ok(i32::MAX));
    assert_eq!(blank_cursor("-2147483648").read_i32(), Ok(i32::MIN));
    assert_eq!(
        blank_cursor("2147483648").read_i32(),
        Err(ErrorKind::OutOfRange)
    );

    assert_eq!(blank_cursor("32767").read_i16(), Ok(i16::MAX));
    assert_eq!(blank_cursor("32768").read_i16(), Err(ErrorKind::OutOfRange));
    assert_eq!(blank_cursor("65535").read_u16(), Ok(u16::MAX));
    assert_eq!(blank_cursor("65536").read_u16(), Err(ErrorKind::OutOfRange));

    assert_eq!(blank_cursor("4294967295").read_u32(), Ok(u32::MAX));
    assert_eq!(blank_cursor("4294967296").read_u32(), Err(ErrorKind::OutOfRange));

    assert_eq!(
        blank_cursor("-9223372036854775808").read_i64(),
        Ok(i64::MIN)
    );
    assert_eq!(
        blank_cursor("9223372036854775808").read_i64(),
        Err(ErrorKind::OutOfRange)
    );
    assert_eq!(
        blank_cursor("18446744073709551615").read_u64(),
        Ok(u64::MAX)
    );
    assert_eq!(
        blank_cursor("18446744073709551616").read_u64(),
        Err(ErrorKind::OutOfRange)
    );
}

#[test]
fn test_overflow_leaves_following_field_unread() {
    let mut cursor = blank_cursor("  100000000000 3.0");

    assert_eq!(cursor.read_i32(), Err(ErrorKind::OutOfRange));
    assert_eq!(cursor.column(), 0);
    assert_eq!(cursor.remaining(), "100000000000 3.0");
}

#[test]
fn test_out_of_range_stores_clamped_bound() {
    let mut value = 7u32;
    let mut cursor = blank_cursor("250");
    assert_eq!(
        cursor.read_into_bounded(&mut value, 0, 100),
        Err(ErrorKind::OutOfRange)
    );
    assert_eq!(value, 100);

    let mut value = 7i32;
    let mut cursor = blank_cursor("-5");
    assert_eq!(
        cursor.read_into_bounded(&mut value, 0, 100),
        Err(ErrorKind::OutOfRange)
    );
    assert_eq!(value, 0);

    let mut value = 7i64;
    let mut cursor = blank_cursor("-99999999999999999999999");
    assert_eq!(
        cursor.read_into_bounded(&mut value, i64::MIN, i64::MAX),
        Err(ErrorKind::OutOfRange)
    );
    assert_eq!(value, i64::MIN);
}

#[test]
fn test_rejected_sign_does_not_store() {
    // no value was parsed, so there is nothing to clamp
    let mut value = 7u32;
    let mut cursor = blank_cursor("-5");
    assert_eq!(
        cursor.read_into_bounded(&mut value, 0, 100),
        Err(ErrorKind::OutOfRange)
    );
    assert_eq!(value, 7);

    let mut value = 7u16;
    let mut cursor = blank_cursor("x");
    assert_eq!(
        cursor.read_into_bounded(&mut value, 0, 100),
        Err(ErrorKind::InvalidFormat)
    );
    assert_eq!(value, 7);
}

#[test]
fn test_bounds_checked_before_separator() {
    let mut cursor = blank_cursor("500abc");
    assert_eq!(cursor.read_u32_in(0, 100), Err(ErrorKind::OutOfRange));

    let mut cursor = blank_cursor("50abc");
    assert_eq!(cursor.read_u32_in(0, 100), Err(ErrorKind::InvalidFormat));
}

#[test]
fn test_fractional_input_is_invalid_for_integers() {
    assert_eq!(blank_cursor("12.5").read_i32(), Err(ErrorKind::InvalidFormat));
    assert_eq!(blank_cursor("1e3").read_i64(), Err(ErrorKind::InvalidFormat));
    assert_eq!(blank_cursor("-").read_i32(), Err(ErrorKind::InvalidFormat));
}

#[test]
fn test_hexadecimal_base() {
    let mut cursor = blank_cursor("ff 0x10 -A");
    cursor.set_numeric_base(16).unwrap();

    assert_eq!(cursor.read_u32(), Ok(255));
    assert_eq!(cursor.read_u32(), Ok(16));
    assert_eq!(cursor.read_i32(), Ok(-10));
}

#[test]
fn test_generic_integer_reads() {
    let mut cursor = blank_cursor("1 2 3 4 5 6");

    assert_eq!(cursor.read::<i16>(), Ok(1));
    assert_eq!(cursor.read::<u16>(), Ok(2));
    assert_eq!(cursor.read_in::<i32>(0, 3), Ok(3));
    assert_eq!(cursor.read_in::<u32>(4, 4), Ok(4));

    let mut a = 0i64;
    let mut b = 0u64;
    cursor.read_into(&mut a).unwrap();
    cursor.read_into_bounded(&mut b, 6, 6).unwrap();
    assert_eq!((a, b), (5, 6));
    assert_eq!(cursor.column(), 6);
}
