//! Arithmetic on small fixed tuples of digits.
//!
//! Tuples are ordered from the most to the least significant digit, so the
//! lexicographic [`Ord`] of a tuple is also its numeric order. These are the
//! building blocks of the double-width multiplication and of the 3-by-2
//! division step used by every long division in this crate.

use crate::arithmetic::{FixedWidthInteger, UnsignedInteger};

/// Two digits, `(high, low)`.
pub type Wide2<T> = (T, T);

/// Three digits, `(high, mid, low)`.
pub type Wide3<T> = (T, T, T);

/// Adds two double-digit values with a possibly signed high digit, returning
/// the wrapped sum and whether overflow occurred.
#[inline]
pub fn wide_add<H: FixedWidthInteger>(
    lhs: (H, H::Magnitude),
    rhs: (H, H::Magnitude),
) -> ((H, H::Magnitude), bool) {
    let (low, carry) = lhs.1.add_reporting_overflow(rhs.1);
    let (high, overflow) = lhs.0.add_reporting_overflow(rhs.0);
    if !carry {
        return ((high, low), overflow);
    }
    let (high, carry_overflow) = high.add_reporting_overflow(H::ONE);
    ((high, low), overflow ^ carry_overflow)
}

/// Subtracts two double-digit values with a possibly signed high digit,
/// returning the wrapped difference and whether overflow occurred.
#[inline]
pub fn wide_sub<H: FixedWidthInteger>(
    lhs: (H, H::Magnitude),
    rhs: (H, H::Magnitude),
) -> ((H, H::Magnitude), bool) {
    let (low, borrow) = lhs.1.sub_reporting_overflow(rhs.1);
    let (high, overflow) = lhs.0.sub_reporting_overflow(rhs.0);
    if !borrow {
        return ((high, low), overflow);
    }
    let (high, borrow_overflow) = high.sub_reporting_overflow(H::ONE);
    ((high, low), overflow ^ borrow_overflow)
}

/// Returns the exact product of two digits.
#[inline]
pub fn multiply_full<U: UnsignedInteger>(lhs: U, rhs: U) -> Wide2<U> {
    lhs.multiplied_full_width(rhs)
}

/// Adds `amount` to the two low digits of `accumulator`, returning whether
/// the sum overflowed the three digits.
#[inline]
pub fn increment_wide3<U: UnsignedInteger>(
    accumulator: &mut Wide3<U>,
    amount: Wide2<U>,
) -> bool {
    let ((mid, low), carry) =
        wide_add::<U>((accumulator.1, accumulator.2), amount);
    let (high, overflow) = if carry {
        accumulator.0.add_reporting_overflow(U::ONE)
    } else {
        (accumulator.0, false)
    };
    *accumulator = (high, mid, low);
    overflow
}

/// Subtracts `amount` from the two low digits of `accumulator`, returning
/// whether the difference underflowed.
#[inline]
pub fn decrement_wide3<U: UnsignedInteger>(
    accumulator: &mut Wide3<U>,
    amount: Wide2<U>,
) -> bool {
    let ((mid, low), borrow) =
        wide_sub::<U>((accumulator.1, accumulator.2), amount);
    let (high, overflow) = if borrow {
        accumulator.0.sub_reporting_overflow(U::ONE)
    } else {
        (accumulator.0, false)
    };
    *accumulator = (high, mid, low);
    overflow
}

/// Subtracts two triple-digit values, returning the wrapped difference and
/// whether the subtraction borrowed.
#[inline]
pub fn wide3_sub<U: UnsignedInteger>(
    lhs: Wide3<U>,
    rhs: Wide3<U>,
) -> (Wide3<U>, bool) {
    let mut difference = lhs;
    let low_borrow = decrement_wide3(&mut difference, (rhs.1, rhs.2));
    let (high, borrow) = difference.0.sub_reporting_overflow(rhs.0);
    ((high, difference.1, difference.2), borrow | low_borrow)
}

/// Returns the exact product of a double-digit value and a digit.
#[inline]
pub fn multiply_wide2_by_digit<U: UnsignedInteger>(
    lhs: Wide2<U>,
    rhs: U,
) -> Wide3<U> {
    let (high, low) = multiply_full(lhs.1, rhs);
    let mut product = (U::ZERO, high, low);
    let (high, low) = multiply_full(lhs.0, rhs);
    let (top, overflow) = product.1.add_reporting_overflow(low);
    product.1 = top;
    // The high digit of the product never exceeds `rhs - 1`.
    product.0 =
        if overflow { high.add_reporting_overflow(U::ONE).0 } else { high };
    product
}

/// Divides `dividend` by a normalized `divisor`, returning the quotient digit
/// and the remainder.
///
/// A divisor is normalized when its high digit has the top bit set.
///
/// # Panics
///
/// * If the two high digits of `dividend` are not less than `divisor`, since
///   the quotient would not fit a single digit.
#[must_use]
pub fn divide3by2<U: UnsignedInteger>(
    dividend: Wide3<U>,
    divisor: Wide2<U>,
) -> (U, Wide2<U>) {
    assert!(
        (dividend.0, dividend.1) < divisor,
        "quotient overflows the divisor width"
    );
    debug_assert!(divisor.0.leading_zero_bit_count() == 0);

    let mut quotient = if dividend.0 == divisor.0 {
        U::MAX
    } else {
        divisor.0.dividing_full_width((dividend.0, dividend.1)).0
    };

    // The estimate exceeds the true quotient by at most two.
    let mut product = multiply_wide2_by_digit(divisor, quotient);
    while product > dividend {
        quotient = quotient.sub_reporting_overflow(U::ONE).0;
        decrement_wide3(&mut product, divisor);
    }

    let ((_, high, low), _) = wide3_sub(dividend, product);
    (quotient, (high, low))
}
