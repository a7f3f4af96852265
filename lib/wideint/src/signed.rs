//! This module contains [`Signed`], a sign and magnitude integer built on top
//! of any unsigned [`Magnitude`]: a fixed-width [`UnsignedInteger`] or the
//! flexible-width [`UIntXL`].

use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    ops::{
        Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Rem,
        RemAssign, Sub, SubAssign,
    },
    str::FromStr,
};

use zeroize::Zeroize;

use crate::{
    arithmetic::{
        limbs, sign_and_magnitude_limbs, sign_extension, BinaryInteger,
        FixedWidthInteger, Limb, UnsignedInteger,
    },
    error::ParseIntegerError,
    flexible::UIntXL,
    text::{self, TextCodec},
    DoubleWidth,
};

/// Sign of an integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Greater than or equal to zero.
    #[default]
    Plus,
    /// Less than zero.
    Minus,
}

impl Not for Sign {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

impl BitXor for Sign {
    type Output = Self;

    /// Sign of a product or a quotient.
    fn bitxor(self, rhs: Self) -> Self::Output {
        if self == rhs {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }
}

/// Unsigned integer that can back a [`Signed`] integer.
///
/// Operations suffixed with `reporting_overflow` return whether the result
/// wrapped around the width of the magnitude. Flexible-width magnitudes only
/// wrap on subtraction.
pub trait Magnitude:
    Clone + Default + Debug + Eq + Ord + Hash + Zeroize + BinaryInteger
{
    /// Returns true if `self` is zero.
    fn is_zero_magnitude(&self) -> bool;

    /// Returns one.
    fn unit() -> Self;

    /// Adds `rhs` to `self`, returning whether the sum overflowed.
    fn increment_reporting_overflow(&mut self, rhs: &Self) -> bool;

    /// Subtracts `rhs` from `self`, returning whether the difference
    /// underflowed, in which case `self` holds the wrapped difference.
    fn decrement_reporting_overflow(&mut self, rhs: &Self) -> bool;

    /// Replaces `self` with the distance `|self - rhs|`, returning true if
    /// `rhs` was the greater.
    fn subtract_distance(&mut self, rhs: &Self) -> bool {
        let borrow = self.decrement_reporting_overflow(rhs);
        if borrow {
            self.form_twos_complement();
        }
        borrow
    }

    /// Replaces `self` with `!self + 1`, wrapping around.
    fn form_twos_complement(&mut self);

    /// Returns the wrapped product, and whether overflow occurred.
    fn multiply_reporting_overflow(&self, rhs: &Self) -> (Self, bool);

    /// Returns the truncated quotient and the remainder.
    ///
    /// # Panics
    ///
    /// * If `rhs` is zero.
    fn quotient_and_remainder(&self, rhs: &Self) -> (Self, Self);

    /// Builds a magnitude from little-endian `limbs`, if representable.
    fn from_limbs(limbs: &[Limb]) -> Option<Self>;

    /// Builds a magnitude from little-endian `limbs`, saturating at the
    /// largest representable value.
    fn clamping_from_limbs(limbs: &[Limb]) -> Self;

    /// Returns the trimmed little-endian limbs.
    fn to_limbs(&self) -> Vec<Limb>;
}

impl<U: UnsignedInteger> Magnitude for U {
    fn is_zero_magnitude(&self) -> bool {
        *self == U::ZERO
    }

    fn unit() -> Self {
        U::ONE
    }

    fn increment_reporting_overflow(&mut self, rhs: &Self) -> bool {
        let overflow;
        (*self, overflow) = self.add_reporting_overflow(*rhs);
        overflow
    }

    fn decrement_reporting_overflow(&mut self, rhs: &Self) -> bool {
        let overflow;
        (*self, overflow) = self.sub_reporting_overflow(*rhs);
        overflow
    }

    fn form_twos_complement(&mut self) {
        *self = self.twos_complement();
    }

    fn multiply_reporting_overflow(&self, rhs: &Self) -> (Self, bool) {
        self.mul_reporting_overflow(*rhs)
    }

    fn quotient_and_remainder(&self, rhs: &Self) -> (Self, Self) {
        self.div_rem_reporting_overflow(*rhs).0
    }

    fn from_limbs(limbs: &[Limb]) -> Option<Self> {
        <U as FixedWidthInteger>::exactly(limbs)
    }

    fn clamping_from_limbs(limbs: &[Limb]) -> Self {
        <U as FixedWidthInteger>::clamping(limbs)
    }

    fn to_limbs(&self) -> Vec<Limb> {
        let mut limbs: Vec<Limb> = self.words().collect();
        limbs::trim(&mut limbs);
        limbs
    }
}

/// Integer made of a [`Sign`] and a [`Magnitude`].
///
/// Its range is symmetric: `-M::MAX..=M::MAX` for a fixed-width magnitude.
/// Negative zero can be stored, but it equals and hashes as zero, and every
/// arithmetic result is normalized to a [`Sign::Plus`] zero.
#[derive(Clone, Copy, Default)]
pub struct Signed<M: Magnitude> {
    sign: Sign,
    magnitude: M,
}

/// Signed integer of unbounded width.
pub type IntXL = Signed<UIntXL>;

impl<M: Magnitude> Signed<M> {
    /// Create a new [`Signed`] from its `sign` and `magnitude`.
    #[must_use]
    pub const fn new(sign: Sign, magnitude: M) -> Self {
        Self { sign, magnitude }
    }

    /// Create a new nonnegative [`Signed`].
    #[must_use]
    pub fn from_magnitude(magnitude: M) -> Self {
        Self::new(Sign::Plus, magnitude)
    }

    /// Returns the stored sign, which may be [`Sign::Minus`] for zero.
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns the sign, [`Sign::Plus`] for zero.
    #[must_use]
    pub fn normalized_sign(&self) -> Sign {
        if self.magnitude.is_zero_magnitude() {
            Sign::Plus
        } else {
            self.sign
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn magnitude(&self) -> &M {
        &self.magnitude
    }

    /// Returns the `(sign, magnitude)` parts.
    #[must_use]
    pub fn into_parts(self) -> (Sign, M) {
        (self.sign, self.magnitude)
    }

    /// Returns true if `self` is zero of either sign.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero_magnitude()
    }

    /// Flips the sign, leaving the magnitude untouched.
    pub fn negate(&mut self) {
        self.sign = !self.sign;
    }

    fn normalized(self) -> Self {
        Self::new(self.normalized_sign(), self.magnitude)
    }

    /// Adds `rhs` to `self`, returning the wrapped sum and whether the
    /// magnitude overflowed.
    #[must_use]
    pub fn add_reporting_overflow(&self, rhs: &Self) -> (Self, bool) {
        let mut sign = self.sign;
        let mut magnitude = self.magnitude.clone();
        let overflow = if self.sign == rhs.sign {
            magnitude.increment_reporting_overflow(&rhs.magnitude)
        } else {
            if magnitude.subtract_distance(&rhs.magnitude) {
                sign = !sign;
            }
            false
        };
        (Self::new(sign, magnitude).normalized(), overflow)
    }

    /// Subtracts `rhs` from `self`, returning the wrapped difference and
    /// whether the magnitude overflowed.
    #[must_use]
    pub fn sub_reporting_overflow(&self, rhs: &Self) -> (Self, bool) {
        let negated = Self::new(!rhs.sign, rhs.magnitude.clone());
        self.add_reporting_overflow(&negated)
    }

    /// Multiplies `self` by `rhs`, returning the wrapped product and whether
    /// the magnitude overflowed.
    #[must_use]
    pub fn mul_reporting_overflow(&self, rhs: &Self) -> (Self, bool) {
        let (magnitude, overflow) =
            self.magnitude.multiply_reporting_overflow(&rhs.magnitude);
        (Self::new(self.sign ^ rhs.sign, magnitude).normalized(), overflow)
    }

    /// Returns the quotient truncated toward zero, and the remainder, which
    /// takes the sign of `self`.
    ///
    /// # Panics
    ///
    /// * If `rhs` is zero.
    #[must_use]
    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        let (quotient, remainder) =
            self.magnitude.quotient_and_remainder(&rhs.magnitude);
        (
            Self::new(self.sign ^ rhs.sign, quotient).normalized(),
            Self::new(self.sign, remainder).normalized(),
        )
    }

    /// Converts `source` when its magnitude is representable by `M`.
    pub fn exactly<S: BinaryInteger + ?Sized>(source: &S) -> Option<Self> {
        let (is_negative, magnitude) = sign_and_magnitude_limbs(source);
        let sign = if is_negative { Sign::Minus } else { Sign::Plus };
        M::from_limbs(&magnitude).map(|magnitude| Self::new(sign, magnitude))
    }

    /// Converts `source`, saturating its magnitude at the largest value of
    /// `M`.
    pub fn clamping<S: BinaryInteger + ?Sized>(source: &S) -> Self {
        let (is_negative, magnitude) = sign_and_magnitude_limbs(source);
        let sign = if is_negative { Sign::Minus } else { Sign::Plus };
        Self::new(sign, M::clamping_from_limbs(&magnitude))
    }

    /// Converts `source`.
    ///
    /// # Panics
    ///
    /// * If the magnitude of `source` is not representable by `M`.
    pub fn from_integer<S: BinaryInteger + ?Sized>(source: &S) -> Self {
        match Self::exactly(source) {
            Some(value) => value,
            None => panic!("integer out of range"),
        }
    }
}

impl<M: Magnitude> From<M> for Signed<M> {
    fn from(magnitude: M) -> Self {
        Self::from_magnitude(magnitude)
    }
}

macro_rules! impl_from_native {
    ($($int:ty),*) => {$(
        impl From<$int> for IntXL {
            fn from(value: $int) -> Self {
                let (is_negative, magnitude) = sign_and_magnitude_limbs(&value);
                let sign = if is_negative { Sign::Minus } else { Sign::Plus };
                Self::new(sign, UIntXL::new(magnitude))
            }
        }
    )*};
}

impl_from_native!(
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize
);

impl<H: FixedWidthInteger> From<DoubleWidth<H>> for IntXL {
    fn from(value: DoubleWidth<H>) -> Self {
        let (is_negative, magnitude) = sign_and_magnitude_limbs(&value);
        let sign = if is_negative { Sign::Minus } else { Sign::Plus };
        Self::new(sign, UIntXL::new(magnitude))
    }
}

impl<M: Magnitude> BinaryInteger for Signed<M> {
    fn is_negative(&self) -> bool {
        self.normalized_sign() == Sign::Minus
    }

    fn word_count(&self) -> usize {
        self.magnitude.word_count() + 1
    }

    fn word(&self, index: usize) -> Limb {
        let is_negative = self.is_negative();
        if index >= self.word_count() {
            return sign_extension(is_negative);
        }
        let word = self.magnitude.word(index);
        if !is_negative {
            return word;
        }
        // The increment of `!magnitude + 1` reaches `index` only through
        // zero limbs.
        let carry = (0..index).all(|lower| self.magnitude.word(lower) == 0);
        (!word).wrapping_add(Limb::from(carry))
    }

    fn low_words(&self, count: usize) -> Vec<Limb> {
        let mut words = self.magnitude.low_words(count);
        if self.is_negative() {
            limbs::form_twos_complement(&mut words);
        }
        words
    }
}

// ----------- Traits Impls -----------

impl<M: Magnitude> PartialEq for Signed<M> {
    fn eq(&self, rhs: &Self) -> bool {
        self.normalized_sign() == rhs.normalized_sign()
            && self.magnitude == rhs.magnitude
    }
}

impl<M: Magnitude> Eq for Signed<M> {}

impl<M: Magnitude> Ord for Signed<M> {
    fn cmp(&self, rhs: &Self) -> Ordering {
        match (self.normalized_sign(), rhs.normalized_sign()) {
            (Sign::Plus, Sign::Plus) => self.magnitude.cmp(&rhs.magnitude),
            (Sign::Minus, Sign::Minus) => rhs.magnitude.cmp(&self.magnitude),
            (Sign::Plus, Sign::Minus) => Ordering::Greater,
            (Sign::Minus, Sign::Plus) => Ordering::Less,
        }
    }
}

impl<M: Magnitude> PartialOrd for Signed<M> {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl<M: Magnitude> Hash for Signed<M> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.normalized_sign().hash(state);
        self.magnitude.hash(state);
    }
}

impl<M: Magnitude> Zeroize for Signed<M> {
    fn zeroize(&mut self) {
        self.sign = Sign::Plus;
        self.magnitude.zeroize();
    }
}

impl<M: Magnitude> TextCodec for Signed<M> {
    fn from_sign_and_magnitude(sign: Sign, magnitude: &[Limb]) -> Option<Self> {
        M::from_limbs(magnitude)
            .map(|magnitude| Self::new(sign, magnitude).normalized())
    }

    fn to_sign_and_magnitude(&self) -> (Sign, Vec<Limb>) {
        (self.normalized_sign(), self.magnitude.to_limbs())
    }
}

impl<M: Magnitude> Display for Signed<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(self, f, 10, "", false)
    }
}

impl<M: Magnitude> Debug for Signed<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl<M: Magnitude> FromStr for Signed<M> {
    type Err = ParseIntegerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

// ----------- Operators -----------

/// Arithmetic operators for owned and borrowed receivers, trapping on
/// overflow of the magnitude.
macro_rules! impl_trapping_op {
    (
        $trait:ident,
        $method:ident,
        $assign_trait:ident,
        $assign_method:ident,
        $reporting:ident,
        $message:literal
    ) => {
        impl<M: Magnitude, B: Borrow<Signed<M>>> $trait<B> for &Signed<M> {
            type Output = Signed<M>;

            #[track_caller]
            fn $method(self, rhs: B) -> Self::Output {
                let (result, overflow) = self.$reporting(rhs.borrow());
                assert!(!overflow, $message);
                result
            }
        }

        impl<M: Magnitude, B: Borrow<Signed<M>>> $trait<B> for Signed<M> {
            type Output = Signed<M>;

            #[track_caller]
            fn $method(self, rhs: B) -> Self::Output {
                $trait::$method(&self, rhs)
            }
        }

        impl<M: Magnitude, B: Borrow<Signed<M>>> $assign_trait<B>
            for Signed<M>
        {
            #[track_caller]
            fn $assign_method(&mut self, rhs: B) {
                *self = $trait::$method(&*self, rhs);
            }
        }
    };
}

impl_trapping_op!(
    Add,
    add,
    AddAssign,
    add_assign,
    add_reporting_overflow,
    "attempt to add with overflow"
);
impl_trapping_op!(
    Sub,
    sub,
    SubAssign,
    sub_assign,
    sub_reporting_overflow,
    "attempt to subtract with overflow"
);
impl_trapping_op!(
    Mul,
    mul,
    MulAssign,
    mul_assign,
    mul_reporting_overflow,
    "attempt to multiply with overflow"
);

impl<M: Magnitude, B: Borrow<Signed<M>>> Div<B> for &Signed<M> {
    type Output = Signed<M>;

    #[track_caller]
    fn div(self, rhs: B) -> Self::Output {
        self.div_rem(rhs.borrow()).0
    }
}

impl<M: Magnitude, B: Borrow<Signed<M>>> Div<B> for Signed<M> {
    type Output = Signed<M>;

    #[track_caller]
    fn div(self, rhs: B) -> Self::Output {
        &self / rhs
    }
}

impl<M: Magnitude, B: Borrow<Signed<M>>> DivAssign<B> for Signed<M> {
    #[track_caller]
    fn div_assign(&mut self, rhs: B) {
        *self = &*self / rhs;
    }
}

impl<M: Magnitude, B: Borrow<Signed<M>>> Rem<B> for &Signed<M> {
    type Output = Signed<M>;

    #[track_caller]
    fn rem(self, rhs: B) -> Self::Output {
        self.div_rem(rhs.borrow()).1
    }
}

impl<M: Magnitude, B: Borrow<Signed<M>>> Rem<B> for Signed<M> {
    type Output = Signed<M>;

    #[track_caller]
    fn rem(self, rhs: B) -> Self::Output {
        &self % rhs
    }
}

impl<M: Magnitude, B: Borrow<Signed<M>>> RemAssign<B> for Signed<M> {
    #[track_caller]
    fn rem_assign(&mut self, rhs: B) {
        *self = &*self % rhs;
    }
}

impl<M: Magnitude> Neg for Signed<M> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

impl<M: Magnitude> Neg for &Signed<M> {
    type Output = Signed<M>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

// ----------- Num Traits -----------

impl<M: Magnitude> num_traits::Zero for Signed<M> {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.magnitude.is_zero_magnitude()
    }
}

impl<M: Magnitude> num_traits::One for Signed<M> {
    fn one() -> Self {
        Self::from_magnitude(M::unit())
    }
}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;
    use std::collections::hash_map::RandomState;

    use num_bigint::BigInt;
    use proptest::prelude::*;

    use super::*;
    use crate::{test_helpers::to_bigint, Int128, Int256, UInt128};

    fn intxl() -> impl Strategy<Value = IntXL> {
        (any::<bool>(), prop::collection::vec(any::<Limb>(), 0..6)).prop_map(
            |(negative, limbs)| {
                let sign = if negative { Sign::Minus } else { Sign::Plus };
                IntXL::new(sign, UIntXL::new(limbs))
            },
        )
    }

    fn signed_u8(value: i16) -> Signed<u8> {
        let sign = if value < 0 { Sign::Minus } else { Sign::Plus };
        Signed::new(sign, value.unsigned_abs() as u8)
    }

    #[test]
    fn opposite_magnitudes_add_to_plus_zero() {
        let lhs = Signed::new(Sign::Minus, 5u64);
        let rhs = Signed::new(Sign::Plus, 5u64);
        let sum = lhs + rhs;
        assert!(sum.is_zero());
        assert_eq!(sum.sign(), Sign::Plus);
        assert_eq!(sum, Signed::default());

        let lhs = IntXL::from(-5i32);
        let sum = &lhs + IntXL::from(5u8);
        assert_eq!(sum.sign(), Sign::Plus);
        assert_eq!(sum, IntXL::default());
    }

    #[test]
    fn negative_zero_equals_zero() {
        let negative_zero = Signed::new(Sign::Minus, 0u32);
        let zero = Signed::new(Sign::Plus, 0u32);
        assert_eq!(negative_zero, zero);
        assert_eq!(negative_zero.cmp(&zero), Ordering::Equal);
        assert_eq!(negative_zero.sign(), Sign::Minus);
        assert_eq!(negative_zero.normalized_sign(), Sign::Plus);
        assert!(!negative_zero.is_negative());
        assert_eq!(negative_zero.to_string(), "0");

        let state = RandomState::new();
        assert_eq!(state.hash_one(negative_zero), state.hash_one(zero));
    }

    #[test]
    fn negation_flips_the_sign_only() {
        let value = Signed::new(Sign::Plus, 0u8);
        let negated = -value;
        assert_eq!(negated.sign(), Sign::Minus);
        assert_eq!(*negated.magnitude(), 0);
        assert_eq!(-IntXL::from(7u8), IntXL::from(-7i8));
    }

    #[test]
    fn arithmetic_agrees_with_i16_in_range() {
        proptest!(|(lhs in -255i16..=255, rhs in -255i16..=255)| {
            let (signed_lhs, signed_rhs) = (signed_u8(lhs), signed_u8(rhs));

            let (sum, overflow) =
                signed_lhs.add_reporting_overflow(&signed_rhs);
            prop_assert_eq!(overflow, (lhs + rhs).abs() > 255);
            if !overflow {
                prop_assert_eq!(sum, signed_u8(lhs + rhs));
            }

            let (difference, overflow) =
                signed_lhs.sub_reporting_overflow(&signed_rhs);
            prop_assert_eq!(overflow, (lhs - rhs).abs() > 255);
            if !overflow {
                prop_assert_eq!(difference, signed_u8(lhs - rhs));
            }

            let product = i32::from(lhs) * i32::from(rhs);
            let (result, overflow) =
                signed_lhs.mul_reporting_overflow(&signed_rhs);
            prop_assert_eq!(overflow, product.abs() > 255);
            if !overflow {
                prop_assert_eq!(
                    i32::from(i16::exactly(&result).unwrap()),
                    product
                );
            }

            if rhs != 0 {
                let (quotient, remainder) = signed_lhs.div_rem(&signed_rhs);
                prop_assert_eq!(quotient, signed_u8(lhs / rhs));
                prop_assert_eq!(remainder, signed_u8(lhs % rhs));
            }

            prop_assert_eq!(signed_lhs.cmp(&signed_rhs), lhs.cmp(&rhs));
        });
    }

    #[test]
    fn flexible_arithmetic_agrees_with_bigint() {
        proptest!(|(lhs in intxl(), rhs in intxl())| {
            let (big_lhs, big_rhs) = (to_bigint(&lhs), to_bigint(&rhs));

            prop_assert_eq!(to_bigint(&(&lhs + &rhs)), &big_lhs + &big_rhs);
            prop_assert_eq!(to_bigint(&(&lhs - &rhs)), &big_lhs - &big_rhs);
            prop_assert_eq!(to_bigint(&(&lhs * &rhs)), &big_lhs * &big_rhs);
            prop_assert_eq!(lhs.cmp(&rhs), big_lhs.cmp(&big_rhs));

            if !rhs.is_zero() {
                let (quotient, remainder) = lhs.div_rem(&rhs);
                prop_assert_eq!(to_bigint(&quotient), &big_lhs / &big_rhs);
                prop_assert_eq!(to_bigint(&remainder), &big_lhs % &big_rhs);
                prop_assert!(remainder.magnitude() < rhs.magnitude());
                prop_assert_eq!(quotient * &rhs + remainder, lhs);
            }
        });
    }

    #[test]
    fn words_are_twos_complement() {
        proptest!(|(value: i128)| {
            let signed = IntXL::from(value);
            prop_assert_eq!(Int128::exactly(&signed), Int128::exactly(&value));
            prop_assert_eq!(to_bigint(&signed), BigInt::from(value));
        });
        let value = IntXL::from(-(1i128 << 64));
        assert_eq!(
            value.words().collect::<Vec<_>>(),
            vec![0, u64::MAX, u64::MAX]
        );
        assert_eq!(value.word(10), u64::MAX);
    }

    #[test]
    fn conversions_between_kinds() {
        let value = IntXL::from(Int256::MIN);
        assert_eq!(Int256::exactly(&value), Some(Int256::MIN));
        assert_eq!(Int256::exactly(&(value - IntXL::from(1u8))), None);

        assert_eq!(Signed::<u8>::exactly(&-255i32), Some(signed_u8(-255)));
        assert_eq!(Signed::<u8>::exactly(&256i32), None);
        assert_eq!(
            Signed::<UInt128>::exactly(&i128::MIN),
            Some(Signed::new(Sign::Minus, UInt128::new(1 << 63, 0)))
        );
        assert_eq!(u8::exactly(&Signed::new(Sign::Minus, 0u8)), Some(0));
        assert_eq!(u8::exactly(&Signed::new(Sign::Minus, 1u8)), None);
    }

    #[test]
    fn clamping_saturates_the_magnitude() {
        type Int129 = Signed<UInt128>;
        let max = Int129::from_magnitude(UInt128::MAX);

        assert_eq!(Int129::clamping(&Int256::MAX), max);
        assert_eq!(Int129::clamping(&Int256::MIN), -max);
        assert_eq!(Int129::clamping(&u128::MAX), max);
        assert_eq!(
            Int129::clamping(&-5i8),
            Int129::new(Sign::Minus, UInt128::from(5u64))
        );
        assert_eq!(IntXL::clamping(&Int256::MIN), IntXL::from(Int256::MIN));
        assert_eq!(Signed::<u8>::clamping(&-300i16), signed_u8(-255));
    }

    #[test]
    fn from_integer_converts_in_range() {
        let min = Signed::<UInt128>::from_integer(&i128::MIN);
        assert_eq!(min.sign(), Sign::Minus);
        assert_eq!(Some(*min.magnitude()), UInt128::exactly(&(1u128 << 127)));
        assert_eq!(IntXL::from_integer(&-7i64), IntXL::from(-7i64));
    }

    #[test]
    fn low_words_match_the_words_view() {
        proptest!(|(value in intxl(), extra in 0usize..3)| {
            let count = value.word_count() + extra;
            let expected: Vec<Limb> =
                (0..count).map(|index| value.word(index)).collect();
            prop_assert_eq!(value.low_words(count), expected);
        });
        let value = -IntXL::from(UIntXL::new(vec![0, 0, 0, 1]));
        assert_eq!(value.low_words(5), vec![0, 0, 0, u64::MAX, u64::MAX]);
        assert_eq!(value.low_words(2), vec![0, 0]);
    }

    #[test]
    fn difference_of_longer_magnitude_is_trimmed() {
        let lhs = IntXL::from(1u8);
        let rhs = IntXL::from(UIntXL::new(vec![2, u64::MAX]));
        let difference = lhs - rhs;
        assert_eq!(difference.sign(), Sign::Minus);
        assert_eq!(difference.magnitude().limbs(), &[1, u64::MAX]);
    }

    #[test]
    fn text_round_trip() {
        let text = "-123456789012345678901234567890";
        let value: IntXL = text.parse().unwrap();
        assert_eq!(value.to_string(), text);
        assert_eq!(value.encode(16, true), "-18EE90FF6C373E0EE4E3F0AD2");
        assert_eq!(IntXL::decode("-0", None), Some(IntXL::default()));
        assert_eq!(Signed::<u8>::decode("-255", None), Some(signed_u8(-255)));
        assert_eq!(Signed::<u8>::decode("-256", None), None);
        assert_eq!(format!("{:>6}", signed_u8(-12)), "   -12");

        proptest!(|(value in intxl(), radix in 2..=36u32)| {
            let text = value.encode(radix, false);
            prop_assert_eq!(IntXL::decode(&text, Some(radix)), Some(value));
        });
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn division_by_zero_traps() {
        _ = IntXL::from(5u8) / IntXL::default();
    }

    #[test]
    #[should_panic(expected = "attempt to add with overflow")]
    fn fixed_magnitude_overflow_traps() {
        _ = Signed::new(Sign::Minus, u8::MAX) + Signed::new(Sign::Minus, 1u8);
    }

    #[test]
    #[should_panic(expected = "integer out of range")]
    fn narrowing_conversion_traps() {
        _ = Signed::<u8>::from_integer(&256u16);
    }
}
