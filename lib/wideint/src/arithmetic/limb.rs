//! Single [`Limb`] primitives: carrying addition, borrowing subtraction,
//! widening multiplication and narrowing division.

use num_traits::{ConstOne, ConstZero};

/// Machine word used as the limb of every multi-word integer.
pub type Limb = u64;
/// Integer twice as wide as [`Limb`].
pub type WideLimb = u128;

/// Multiply two [`Limb`]'s and return widened result.
#[inline(always)]
#[must_use]
pub const fn widening_mul(a: Limb, b: Limb) -> WideLimb {
    #[cfg(not(target_family = "wasm"))]
    {
        a as WideLimb * b as WideLimb
    }
    #[cfg(target_family = "wasm")]
    {
        widening_mul_split(a, b)
    }
}

/// Multiply two [`Limb`]'s and return widened result.
///
/// Splits both operands into 32-bit halves and combines the four cross
/// products, which is cheaper than a native 128-bit multiplication on
/// WebAssembly.
#[inline(always)]
#[doc(hidden)]
#[must_use]
pub const fn widening_mul_split(a: Limb, b: Limb) -> WideLimb {
    let a_lo = a as u32 as Limb;
    let a_hi = a >> 32;
    let b_lo = b as u32 as Limb;
    let b_hi = b >> 32;

    let lolo = (a_lo * b_lo) as WideLimb;
    let lohi = ((a_lo * b_hi) as WideLimb) << 32;
    let hilo = ((a_hi * b_lo) as WideLimb) << 32;
    let hihi = ((a_hi * b_hi) as WideLimb) << 64;
    (lolo | hihi) + (lohi + hilo)
}

/// Multiply two [`Limb`]'s and return the `(high, low)` parts of the product.
#[inline(always)]
#[must_use]
pub const fn multiply_full(a: Limb, b: Limb) -> (Limb, Limb) {
    let product = widening_mul(a, b);
    ((product >> Limb::BITS) as Limb, product as Limb)
}

/// Calculate `a + b * c`, returning the lower 64 bits of the result and the
/// upper 64 bits as carry.
#[inline(always)]
#[must_use]
pub const fn mac(a: Limb, b: Limb, c: Limb) -> (Limb, Limb) {
    let a = a as WideLimb;
    let tmp = a + widening_mul(b, c);
    let carry = (tmp >> Limb::BITS) as Limb;
    (tmp as Limb, carry)
}

/// Calculate `a + (b * c) + carry`, returning the least significant digit
/// and the most significant digit as the new carry.
#[inline(always)]
#[must_use]
pub const fn carrying_mac(
    a: Limb,
    b: Limb,
    c: Limb,
    carry: Limb,
) -> (Limb, Limb) {
    let a = a as WideLimb;
    let carry = carry as WideLimb;
    let tmp = a + widening_mul(b, c) + carry;
    let carry = (tmp >> Limb::BITS) as Limb;
    (tmp as Limb, carry)
}

/// Calculate `a = a + b + carry` and return the result and carry.
#[inline(always)]
#[must_use]
pub const fn adc(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let a = a as WideLimb;
    let b = b as WideLimb;
    let carry = carry as WideLimb;
    let tmp = a + b + carry;
    let carry = (tmp >> Limb::BITS) as Limb;
    (tmp as Limb, carry)
}

/// Sets a = a + b + carry, and returns the new carry.
#[inline(always)]
pub fn adc_assign(a: &mut Limb, b: Limb, carry: bool) -> bool {
    let (sum, carry1) = a.overflowing_add(b);
    let (sum, carry2) = sum.overflowing_add(Limb::from(carry));
    *a = sum;
    carry1 | carry2
}

/// Calculate `a = a - b - borrow` and return the result and borrow.
#[inline(always)]
#[must_use]
pub const fn sbb(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let a = a as WideLimb;
    let b = b as WideLimb;
    let borrow = borrow as WideLimb;
    let tmp = (WideLimb::ONE << Limb::BITS) + a - b - borrow;
    let borrow = if tmp >> Limb::BITS == 0 { Limb::ONE } else { Limb::ZERO };
    (tmp as Limb, borrow)
}

/// Sets a = a - b - borrow, and returns the borrow.
#[inline(always)]
pub fn sbb_assign(a: &mut Limb, b: Limb, borrow: bool) -> bool {
    let (sub, borrow1) = a.overflowing_sub(b);
    let (sub, borrow2) = sub.overflowing_sub(Limb::from(borrow));
    *a = sub;
    borrow1 | borrow2
}

/// Divide the two-limb value `(high, low)` by `divisor`, returning the
/// quotient and the remainder.
///
/// # Panics
///
/// * If `divisor` is zero.
/// * If `high >= divisor`, since the quotient would not fit a single limb.
#[inline(always)]
#[must_use]
pub const fn div_wide(high: Limb, low: Limb, divisor: Limb) -> (Limb, Limb) {
    assert!(divisor != 0, "attempt to divide by zero");
    assert!(high < divisor, "quotient overflows a limb");
    let dividend = ((high as WideLimb) << Limb::BITS) | low as WideLimb;
    let divisor = divisor as WideLimb;
    ((dividend / divisor) as Limb, (dividend % divisor) as Limb)
}
