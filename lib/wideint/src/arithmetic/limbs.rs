//! Kernels over little-endian [`Limb`] sequences.
//!
//! A sequence represents the unsigned value `Σ limbs[i] * 2^(64 * i)`. The
//! canonical form is trimmed: no most significant zero limbs, and zero is the
//! empty sequence. Functions taking `&mut [Limb]` work in place on a buffer
//! of fixed length, while functions returning a [`Vec`] always return it
//! trimmed.

use alloc::{vec, vec::Vec};
use core::cmp::Ordering;

use crate::arithmetic::{
    limb::{self, Limb},
    tuple,
};

/// Operands at least this long are multiplied with Karatsuba's method.
pub const KARATSUBA_THRESHOLD: usize = 40;

/// Removes the most significant zero limbs of `limbs`.
#[inline]
pub fn trim(limbs: &mut Vec<Limb>) {
    let len = trimmed(limbs).len();
    limbs.truncate(len);
}

/// Returns `limbs` without its most significant zero limbs.
#[inline]
#[must_use]
pub fn trimmed(limbs: &[Limb]) -> &[Limb] {
    let len =
        limbs.iter().rposition(|&limb| limb != 0).map_or(0, |top| top + 1);
    &limbs[..len]
}

/// Splits `limbs` at `index` into its trimmed `(low, high)` parts.
#[inline]
#[must_use]
pub fn partition(limbs: &[Limb], index: usize) -> (&[Limb], &[Limb]) {
    let (low, high) = limbs.split_at(index.min(limbs.len()));
    (trimmed(low), trimmed(high))
}

/// Compares two sequences as if both were padded with zeros.
#[must_use]
pub fn compare(lhs: &[Limb], rhs: &[Limb]) -> Ordering {
    let (lhs, rhs) = (trimmed(lhs), trimmed(rhs));
    lhs.len()
        .cmp(&rhs.len())
        .then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
}

// ----------- Addition -----------

/// Adds `amount` to the window of `limbs` starting at `index` and ending
/// where `amount` ends, returning the end of the window and the carry out of
/// it.
///
/// # Panics
///
/// * If the window does not fit `limbs`.
pub fn increment_in_intersection(
    limbs: &mut [Limb],
    amount: &[Limb],
    index: usize,
    carry: bool,
) -> (usize, bool) {
    let end = index + amount.len();
    let mut carry = carry;
    for (limb, &addend) in limbs[index..end].iter_mut().zip(amount) {
        carry = limb::adc_assign(limb, addend, carry);
    }
    (end, carry)
}

/// Propagates `carry` through `limbs` from `index`, returning whether it got
/// past the end.
pub fn increment_by_carry(
    limbs: &mut [Limb],
    index: usize,
    carry: bool,
) -> bool {
    if !carry {
        return false;
    }
    for limb in limbs.iter_mut().skip(index) {
        let (sum, overflow) = limb.overflowing_add(1);
        *limb = sum;
        if !overflow {
            return false;
        }
    }
    true
}

/// Adds `amount` to `limbs` starting at `index`, returning whether the sum
/// overflowed the buffer.
///
/// # Panics
///
/// * If `amount` placed at `index` does not fit `limbs`.
pub fn increment(limbs: &mut [Limb], amount: &[Limb], index: usize) -> bool {
    let (end, carry) = increment_in_intersection(limbs, amount, index, false);
    increment_by_carry(limbs, end, carry)
}

/// Adds a single limb to `limbs` at `index`, returning whether the sum
/// overflowed the buffer.
pub fn increment_by_limb(
    limbs: &mut [Limb],
    amount: Limb,
    index: usize,
) -> bool {
    if amount == 0 {
        return false;
    }
    match limbs.get_mut(index) {
        Some(limb) => {
            let carry = limb::adc_assign(limb, amount, false);
            increment_by_carry(limbs, index + 1, carry)
        }
        None => true,
    }
}

// ----------- Subtraction -----------

/// Subtracts `amount` from the window of `limbs` starting at `index` and
/// ending where `amount` ends, returning the end of the window and the borrow
/// out of it.
///
/// # Panics
///
/// * If the window does not fit `limbs`.
pub fn decrement_in_intersection(
    limbs: &mut [Limb],
    amount: &[Limb],
    index: usize,
    borrow: bool,
) -> (usize, bool) {
    let end = index + amount.len();
    let mut borrow = borrow;
    for (limb, &subtrahend) in limbs[index..end].iter_mut().zip(amount) {
        borrow = limb::sbb_assign(limb, subtrahend, borrow);
    }
    (end, borrow)
}

/// Propagates `borrow` through `limbs` from `index`, returning whether it got
/// past the end.
pub fn decrement_by_borrow(
    limbs: &mut [Limb],
    index: usize,
    borrow: bool,
) -> bool {
    if !borrow {
        return false;
    }
    for limb in limbs.iter_mut().skip(index) {
        let (difference, underflow) = limb.overflowing_sub(1);
        *limb = difference;
        if !underflow {
            return false;
        }
    }
    true
}

/// Subtracts `amount` from `limbs` starting at `index`, returning whether the
/// difference underflowed. On underflow `limbs` holds the wrapped difference.
///
/// # Panics
///
/// * If `amount` placed at `index` does not fit `limbs`.
pub fn decrement(limbs: &mut [Limb], amount: &[Limb], index: usize) -> bool {
    let (end, borrow) = decrement_in_intersection(limbs, amount, index, false);
    decrement_by_borrow(limbs, end, borrow)
}

/// Subtracts a single limb from `limbs` at `index`, returning whether the
/// difference underflowed.
pub fn decrement_by_limb(
    limbs: &mut [Limb],
    amount: Limb,
    index: usize,
) -> bool {
    if amount == 0 {
        return false;
    }
    match limbs.get_mut(index) {
        Some(limb) => {
            let borrow = limb::sbb_assign(limb, amount, false);
            decrement_by_borrow(limbs, index + 1, borrow)
        }
        None => true,
    }
}

// ----------- Multiplication -----------

/// Adds `lhs * multiplier` to `limbs` starting at `index`, returning whether
/// the sum overflowed the buffer.
pub fn increment_by_product(
    limbs: &mut [Limb],
    lhs: &[Limb],
    multiplier: Limb,
    index: usize,
) -> bool {
    let end = index + lhs.len();
    let mut carry = 0;
    for (limb, &digit) in limbs[index..end].iter_mut().zip(lhs) {
        (*limb, carry) = limb::carrying_mac(*limb, digit, multiplier, carry);
    }
    increment_by_limb(limbs, carry, end)
}

/// Multiplies `limbs` by `multiplier` and adds `addend`, growing the
/// sequence when needed.
pub fn multiply_by_limb_and_add(
    limbs: &mut Vec<Limb>,
    multiplier: Limb,
    addend: Limb,
) {
    let mut carry = addend;
    for limb in limbs.iter_mut() {
        (*limb, carry) = limb::carrying_mac(0, *limb, multiplier, carry);
    }
    if carry != 0 {
        limbs.push(carry);
    }
}

/// Returns the exact product of `lhs` and `rhs`.
#[must_use]
pub fn multiply(lhs: &[Limb], rhs: &[Limb]) -> Vec<Limb> {
    let (lhs, rhs) = (trimmed(lhs), trimmed(rhs));
    let mut product = if lhs.len().min(rhs.len()) < KARATSUBA_THRESHOLD {
        multiply_schoolbook(lhs, rhs)
    } else {
        multiply_karatsuba(lhs, rhs)
    };
    trim(&mut product);
    product
}

fn multiply_schoolbook(lhs: &[Limb], rhs: &[Limb]) -> Vec<Limb> {
    let mut product = vec![0; lhs.len() + rhs.len()];
    for (index, &multiplier) in rhs.iter().enumerate() {
        let overflow =
            increment_by_product(&mut product, lhs, multiplier, index);
        debug_assert!(!overflow);
    }
    product
}

/// `(x1·B + x0)(y1·B + y0) = z2·B² + z1·B + z0`, where
/// `z1 = (x0 + x1)(y0 + y1) - z0 - z2`.
fn multiply_karatsuba(lhs: &[Limb], rhs: &[Limb]) -> Vec<Limb> {
    let half = lhs.len().max(rhs.len()) / 2;
    let (x0, x1) = partition(lhs, half);
    let (y0, y1) = partition(rhs, half);

    let z0 = multiply(x0, y0);
    let z2 = multiply(x1, y1);
    let mut z1 = multiply(&add(x0, x1), &add(y0, y1));
    let borrow = decrement(&mut z1, &z0, 0) | decrement(&mut z1, &z2, 0);
    debug_assert!(!borrow);
    trim(&mut z1);

    let mut product = vec![0; lhs.len() + rhs.len()];
    let overflow = increment(&mut product, &z0, 0)
        | increment(&mut product, &z1, half)
        | increment(&mut product, &z2, 2 * half);
    debug_assert!(!overflow);
    product
}

/// Returns the trimmed sum of `lhs` and `rhs`.
#[must_use]
pub fn add(lhs: &[Limb], rhs: &[Limb]) -> Vec<Limb> {
    let (longer, shorter) =
        if lhs.len() >= rhs.len() { (lhs, rhs) } else { (rhs, lhs) };
    let mut sum = Vec::with_capacity(longer.len() + 1);
    sum.extend_from_slice(longer);
    sum.push(0);
    let overflow = increment(&mut sum, shorter, 0);
    debug_assert!(!overflow);
    trim(&mut sum);
    sum
}

// ----------- Division -----------

/// Divides `limbs` in place by `divisor`, returning the remainder.
///
/// # Panics
///
/// * If `divisor` is zero.
pub fn divide_by_limb(limbs: &mut [Limb], divisor: Limb) -> Limb {
    assert!(divisor != 0, "attempt to divide by zero");
    let mut remainder = 0;
    for limb in limbs.iter_mut().rev() {
        (*limb, remainder) = limb::div_wide(remainder, *limb, divisor);
    }
    remainder
}

/// Subtracts `divisor * multiplier` from `window`, returning whether the
/// difference underflowed.
///
/// `window` is one limb longer than `divisor`.
fn decrement_by_product(
    window: &mut [Limb],
    divisor: &[Limb],
    multiplier: Limb,
) -> bool {
    debug_assert_eq!(window.len(), divisor.len() + 1);
    let mut carry = 0;
    let mut borrow = false;
    for (limb, &digit) in window.iter_mut().zip(divisor) {
        let (product, high) = limb::carrying_mac(0, digit, multiplier, carry);
        carry = high;
        borrow = limb::sbb_assign(limb, product, borrow);
    }
    limb::sbb_assign(&mut window[divisor.len()], carry, borrow)
}

/// Returns the truncated quotient and the remainder of `dividend / divisor`.
///
/// Multi-limb divisors go through Knuth's algorithm D: the divisor is
/// normalized so its top bit is set, every quotient limb is estimated from the
/// top three limbs of the current window and corrected by adding the divisor
/// back while the window underflows.
///
/// # Panics
///
/// * If `divisor` is zero.
#[must_use]
pub fn divide(dividend: &[Limb], divisor: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    let (dividend, divisor) = (trimmed(dividend), trimmed(divisor));
    assert!(!divisor.is_empty(), "attempt to divide by zero");

    if compare(dividend, divisor) == Ordering::Less {
        return (Vec::new(), dividend.to_vec());
    }

    if let &[divisor] = divisor {
        let mut quotient = dividend.to_vec();
        let remainder = divide_by_limb(&mut quotient, divisor);
        trim(&mut quotient);
        let mut remainder = vec![remainder];
        trim(&mut remainder);
        return (quotient, remainder);
    }

    let shift = divisor[divisor.len() - 1].leading_zeros();
    let mut divisor = divisor.to_vec();
    shift_left_in_place(&mut divisor, shift);
    let mut remainder = Vec::with_capacity(dividend.len() + 1);
    remainder.extend_from_slice(dividend);
    remainder.push(0);
    shift_left_in_place(&mut remainder, shift);

    let n = divisor.len();
    let top = (divisor[n - 1], divisor[n - 2]);
    let mut quotient = vec![0; remainder.len() - n];
    for index in (0..quotient.len()).rev() {
        let window = &mut remainder[index..=index + n];
        let head = (window[n], window[n - 1], window[n - 2]);
        let mut digit = if (head.0, head.1) < top {
            tuple::divide3by2(head, top).0
        } else {
            Limb::MAX
        };

        let mut underflow = decrement_by_product(window, &divisor, digit);
        while underflow {
            digit -= 1;
            underflow = !increment(window, &divisor, 0);
        }
        quotient[index] = digit;
    }

    remainder.truncate(n);
    shift_right_in_place(&mut remainder, shift);
    trim(&mut quotient);
    trim(&mut remainder);
    (quotient, remainder)
}

// ----------- Shifts -----------

/// Shifts `limbs` left by `bits < 64` in place, dropping the bits shifted out
/// of the buffer.
pub fn shift_left_in_place(limbs: &mut [Limb], bits: u32) {
    debug_assert!(bits < Limb::BITS);
    if bits == 0 {
        return;
    }
    let mut carry = 0;
    for limb in limbs.iter_mut() {
        let next = *limb >> (Limb::BITS - bits);
        *limb = (*limb << bits) | carry;
        carry = next;
    }
}

/// Shifts `limbs` right by `bits < 64` in place.
pub fn shift_right_in_place(limbs: &mut [Limb], bits: u32) {
    debug_assert!(bits < Limb::BITS);
    if bits == 0 {
        return;
    }
    let mut carry = 0;
    for limb in limbs.iter_mut().rev() {
        let next = *limb << (Limb::BITS - bits);
        *limb = (*limb >> bits) | carry;
        carry = next;
    }
}

/// Returns `limbs << amount`.
#[must_use]
pub fn shift_left(limbs: &[Limb], amount: u32) -> Vec<Limb> {
    let limbs = trimmed(limbs);
    if limbs.is_empty() {
        return Vec::new();
    }
    let offset = (amount / Limb::BITS) as usize;
    let mut shifted = vec![0; offset];
    shifted.extend_from_slice(limbs);
    shifted.push(0);
    shift_left_in_place(&mut shifted[offset..], amount % Limb::BITS);
    trim(&mut shifted);
    shifted
}

/// Returns `limbs >> amount`.
#[must_use]
pub fn shift_right(limbs: &[Limb], amount: u32) -> Vec<Limb> {
    let offset = (amount / Limb::BITS) as usize;
    let Some(limbs) = trimmed(limbs).get(offset..) else {
        return Vec::new();
    };
    let mut shifted = limbs.to_vec();
    shift_right_in_place(&mut shifted, amount % Limb::BITS);
    trim(&mut shifted);
    shifted
}

// ----------- Bits -----------

/// Number of leading zero bits of the most significant limb.
#[must_use]
pub fn leading_zero_bit_count(limbs: &[Limb]) -> u32 {
    limbs.last().map_or(0, |top| top.leading_zeros())
}

/// Number of trailing zero bits, which is the whole bit length of an all-zero
/// buffer.
#[must_use]
pub fn trailing_zero_bit_count(limbs: &[Limb]) -> usize {
    match limbs.iter().position(|&limb| limb != 0) {
        Some(index) => {
            index * Limb::BITS as usize + limbs[index].trailing_zeros() as usize
        }
        None => limbs.len() * Limb::BITS as usize,
    }
}

/// Number of one bits.
#[must_use]
pub fn nonzero_bit_count(limbs: &[Limb]) -> usize {
    limbs.iter().map(|limb| limb.count_ones() as usize).sum()
}

/// Number of bits needed to represent the value.
#[must_use]
pub fn bit_width(limbs: &[Limb]) -> usize {
    let limbs = trimmed(limbs);
    limbs.len() * Limb::BITS as usize - leading_zero_bit_count(limbs) as usize
}

/// Replaces `limbs` with `!limbs + 1`, wrapping around at the buffer length.
pub fn form_twos_complement(limbs: &mut [Limb]) {
    let mut carry = true;
    for limb in limbs.iter_mut() {
        (*limb, carry) = (!*limb).overflowing_add(Limb::from(carry));
    }
}

/// Returns `lhs & rhs`.
#[must_use]
pub fn bitand(lhs: &[Limb], rhs: &[Limb]) -> Vec<Limb> {
    let mut result: Vec<Limb> =
        lhs.iter().zip(rhs).map(|(&lhs, &rhs)| lhs & rhs).collect();
    trim(&mut result);
    result
}

/// Returns `lhs | rhs`.
#[must_use]
pub fn bitor(lhs: &[Limb], rhs: &[Limb]) -> Vec<Limb> {
    zip_padded(lhs, rhs, |lhs, rhs| lhs | rhs)
}

/// Returns `lhs ^ rhs`.
#[must_use]
pub fn bitxor(lhs: &[Limb], rhs: &[Limb]) -> Vec<Limb> {
    zip_padded(lhs, rhs, |lhs, rhs| lhs ^ rhs)
}

fn zip_padded(
    lhs: &[Limb],
    rhs: &[Limb],
    op: impl Fn(Limb, Limb) -> Limb,
) -> Vec<Limb> {
    let len = lhs.len().max(rhs.len());
    let limb_at =
        |limbs: &[Limb], index: usize| limbs.get(index).copied().unwrap_or(0);
    let mut result: Vec<Limb> = (0..len)
        .map(|index| op(limb_at(lhs, index), limb_at(rhs, index)))
        .collect();
    trim(&mut result);
    result
}
