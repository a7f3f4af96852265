//! This module contains [`UIntXL`], an unsigned integer of unbounded width
//! backed by a trimmed little-endian sequence of [`Limb`]s.

use alloc::{vec, vec::Vec};
use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{self, Binary, Debug, Display, LowerHex, Octal, UpperHex},
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor,
        BitXorAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Shl,
        ShlAssign, Shr, ShrAssign, Sub, SubAssign,
    },
    str::FromStr,
};

use zeroize::Zeroize;

use crate::{
    arithmetic::{limbs, sign_and_magnitude_limbs, BinaryInteger, Limb},
    bits::BitIteratorBE,
    error::ParseIntegerError,
    signed::{Magnitude, Sign},
    text::{self, TextCodec},
};

/// Unsigned integer of unbounded width.
///
/// Zero is the empty limb sequence, and no value carries most significant zero
/// limbs, so equality and hashing work on the limbs directly.
#[derive(Clone, Default, PartialEq, Eq, Hash, Zeroize)]
pub struct UIntXL {
    limbs: Vec<Limb>,
}

impl UIntXL {
    /// Additive identity.
    pub const ZERO: Self = Self { limbs: Vec::new() };

    /// Create a new [`UIntXL`] from little-endian `limbs`.
    #[must_use]
    pub fn new(mut limbs: Vec<Limb>) -> Self {
        limbs::trim(&mut limbs);
        Self { limbs }
    }

    /// Returns the trimmed little-endian limbs.
    #[must_use]
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Returns the trimmed little-endian limbs.
    #[must_use]
    pub fn into_limbs(self) -> Vec<Limb> {
        self.limbs
    }

    /// Returns true if `self` is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Returns the number of bits needed to represent `self`.
    #[must_use]
    pub fn bit_width(&self) -> usize {
        limbs::bit_width(&self.limbs)
    }

    /// Number of trailing zero bits, zero for zero.
    #[must_use]
    pub fn trailing_zero_bit_count(&self) -> usize {
        limbs::trailing_zero_bit_count(&self.limbs)
    }

    /// Number of one bits.
    #[must_use]
    pub fn nonzero_bit_count(&self) -> usize {
        limbs::nonzero_bit_count(&self.limbs)
    }

    /// Returns `self - rhs`, or [`None`] if `rhs` is greater.
    #[must_use]
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        let mut difference = self.clone();
        let borrow = difference.decrement_reporting_overflow(rhs);
        (!borrow).then_some(difference)
    }

    /// Returns the quotient and the remainder of `self / rhs`.
    ///
    /// # Panics
    ///
    /// * If `rhs` is zero.
    #[must_use]
    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        let (quotient, remainder) = limbs::divide(&self.limbs, &rhs.limbs);
        (Self { limbs: quotient }, Self { limbs: remainder })
    }

    /// Raises `self` to the power of `exponent`.
    #[must_use]
    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::from(1u8);
        for bit in exponent.bit_be_trimmed_iter() {
            result = &result * &result;
            if bit {
                result *= self;
            }
        }
        result
    }

    /// Converts `source` when it is not negative.
    pub fn exactly<S: BinaryInteger + ?Sized>(source: &S) -> Option<Self> {
        let (is_negative, magnitude) = sign_and_magnitude_limbs(source);
        (!is_negative).then_some(Self { limbs: magnitude })
    }

    /// Converts `source`, mapping negative values to zero.
    pub fn clamping<S: BinaryInteger + ?Sized>(source: &S) -> Self {
        Self::exactly(source).unwrap_or_default()
    }

    /// Converts `source`.
    ///
    /// # Panics
    ///
    /// * If `source` is negative.
    pub fn from_integer<S: BinaryInteger + ?Sized>(source: &S) -> Self {
        match Self::exactly(source) {
            Some(value) => value,
            None => panic!("integer out of range"),
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($int:ty),*) => {$(
        impl From<$int> for UIntXL {
            fn from(value: $int) -> Self {
                Self::new(value.words().collect())
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl From<&[Limb]> for UIntXL {
    fn from(limbs: &[Limb]) -> Self {
        Self::new(limbs.to_vec())
    }
}

impl BinaryInteger for UIntXL {
    fn is_negative(&self) -> bool {
        false
    }

    fn word_count(&self) -> usize {
        self.limbs.as_slice().word_count()
    }

    fn word(&self, index: usize) -> Limb {
        self.limbs.get(index).copied().unwrap_or(0)
    }

    fn low_words(&self, count: usize) -> Vec<Limb> {
        let mut words = self.limbs.clone();
        words.resize(count, 0);
        words
    }
}

impl Magnitude for UIntXL {
    fn is_zero_magnitude(&self) -> bool {
        self.is_zero()
    }

    fn unit() -> Self {
        Self { limbs: vec![1] }
    }

    fn increment_reporting_overflow(&mut self, rhs: &Self) -> bool {
        let len = self.limbs.len().max(rhs.limbs.len()) + 1;
        self.limbs.resize(len, 0);
        let overflow = limbs::increment(&mut self.limbs, &rhs.limbs, 0);
        debug_assert!(!overflow);
        limbs::trim(&mut self.limbs);
        false
    }

    /// On borrow the difference is wrapped at the width of the longer
    /// operand.
    fn decrement_reporting_overflow(&mut self, rhs: &Self) -> bool {
        let len = self.limbs.len().max(rhs.limbs.len());
        self.limbs.resize(len, 0);
        let borrow = limbs::decrement(&mut self.limbs, &rhs.limbs, 0);
        limbs::trim(&mut self.limbs);
        borrow
    }

    fn subtract_distance(&mut self, rhs: &Self) -> bool {
        if *self >= *rhs {
            let borrow = self.decrement_reporting_overflow(rhs);
            debug_assert!(!borrow);
            return false;
        }
        let mut difference = rhs.limbs.clone();
        let borrow = limbs::decrement(&mut difference, &self.limbs, 0);
        debug_assert!(!borrow);
        limbs::trim(&mut difference);
        self.limbs = difference;
        true
    }

    /// Two's complement at the current limb count.
    fn form_twos_complement(&mut self) {
        limbs::form_twos_complement(&mut self.limbs);
        limbs::trim(&mut self.limbs);
    }

    fn multiply_reporting_overflow(&self, rhs: &Self) -> (Self, bool) {
        (Self { limbs: limbs::multiply(&self.limbs, &rhs.limbs) }, false)
    }

    fn quotient_and_remainder(&self, rhs: &Self) -> (Self, Self) {
        self.div_rem(rhs)
    }

    fn from_limbs(limbs: &[Limb]) -> Option<Self> {
        Some(Self::from(limbs))
    }

    fn clamping_from_limbs(limbs: &[Limb]) -> Self {
        Self::from(limbs)
    }

    fn to_limbs(&self) -> Vec<Limb> {
        self.limbs.clone()
    }
}

// ----------- Traits Impls -----------

impl Ord for UIntXL {
    fn cmp(&self, rhs: &Self) -> Ordering {
        limbs::compare(&self.limbs, &rhs.limbs)
    }
}

impl PartialOrd for UIntXL {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl TextCodec for UIntXL {
    fn from_sign_and_magnitude(sign: Sign, magnitude: &[Limb]) -> Option<Self> {
        let value = Self::from(magnitude);
        (sign == Sign::Plus || value.is_zero()).then_some(value)
    }

    fn to_sign_and_magnitude(&self) -> (Sign, Vec<Limb>) {
        (Sign::Plus, self.limbs.clone())
    }
}

impl Display for UIntXL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(self, f, 10, "", false)
    }
}

impl Debug for UIntXL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl LowerHex for UIntXL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(self, f, 16, "0x", false)
    }
}

impl UpperHex for UIntXL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(self, f, 16, "0x", true)
    }
}

impl Octal for UIntXL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(self, f, 8, "0o", false)
    }
}

impl Binary for UIntXL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(self, f, 2, "0b", false)
    }
}

impl FromStr for UIntXL {
    type Err = ParseIntegerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

impl BitIteratorBE for UIntXL {
    fn bit_be_iter(&self) -> impl Iterator<Item = bool> {
        self.limbs.iter().rev().flat_map(|limb| limb.bit_be_iter())
    }
}

// ----------- Operators -----------

/// Implements an operator for owned and borrowed receivers out of a function
/// over limb slices.
macro_rules! impl_limbs_op {
    (
        $trait:ident,
        $method:ident,
        $assign_trait:ident,
        $assign_method:ident,
        $kernel:expr
    ) => {
        impl<B: Borrow<UIntXL>> $trait<B> for &UIntXL {
            type Output = UIntXL;

            #[track_caller]
            fn $method(self, rhs: B) -> Self::Output {
                let kernel: fn(&[Limb], &[Limb]) -> Vec<Limb> = $kernel;
                UIntXL { limbs: kernel(&self.limbs, &rhs.borrow().limbs) }
            }
        }

        impl<B: Borrow<UIntXL>> $trait<B> for UIntXL {
            type Output = UIntXL;

            #[track_caller]
            fn $method(self, rhs: B) -> Self::Output {
                $trait::$method(&self, rhs)
            }
        }

        impl<B: Borrow<UIntXL>> $assign_trait<B> for UIntXL {
            #[track_caller]
            fn $assign_method(&mut self, rhs: B) {
                *self = $trait::$method(&*self, rhs);
            }
        }
    };
}

impl_limbs_op!(Add, add, AddAssign, add_assign, limbs::add);
impl_limbs_op!(Mul, mul, MulAssign, mul_assign, limbs::multiply);
impl_limbs_op!(
    Div,
    div,
    DivAssign,
    div_assign,
    |lhs,
    rhs| limbs::divide(lhs, rhs).0
);
impl_limbs_op!(
    Rem,
    rem,
    RemAssign,
    rem_assign,
    |lhs,
    rhs| limbs::divide(lhs, rhs).1
);
impl_limbs_op!(BitAnd, bitand, BitAndAssign, bitand_assign, limbs::bitand);
impl_limbs_op!(BitOr, bitor, BitOrAssign, bitor_assign, limbs::bitor);
impl_limbs_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, limbs::bitxor);

impl<B: Borrow<UIntXL>> SubAssign<B> for UIntXL {
    #[track_caller]
    fn sub_assign(&mut self, rhs: B) {
        let borrow = self.decrement_reporting_overflow(rhs.borrow());
        assert!(!borrow, "attempt to subtract with overflow");
    }
}

impl<B: Borrow<UIntXL>> Sub<B> for UIntXL {
    type Output = UIntXL;

    #[track_caller]
    fn sub(mut self, rhs: B) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<B: Borrow<UIntXL>> Sub<B> for &UIntXL {
    type Output = UIntXL;

    #[track_caller]
    fn sub(self, rhs: B) -> Self::Output {
        self.clone() - rhs
    }
}

impl Shl<u32> for &UIntXL {
    type Output = UIntXL;

    fn shl(self, amount: u32) -> Self::Output {
        UIntXL { limbs: limbs::shift_left(&self.limbs, amount) }
    }
}

impl Shl<u32> for UIntXL {
    type Output = UIntXL;

    fn shl(self, amount: u32) -> Self::Output {
        &self << amount
    }
}

impl Shr<u32> for &UIntXL {
    type Output = UIntXL;

    fn shr(self, amount: u32) -> Self::Output {
        UIntXL { limbs: limbs::shift_right(&self.limbs, amount) }
    }
}

impl Shr<u32> for UIntXL {
    type Output = UIntXL;

    fn shr(self, amount: u32) -> Self::Output {
        &self >> amount
    }
}

impl ShlAssign<u32> for UIntXL {
    fn shl_assign(&mut self, amount: u32) {
        *self = &*self << amount;
    }
}

impl ShrAssign<u32> for UIntXL {
    fn shr_assign(&mut self, amount: u32) {
        *self = &*self >> amount;
    }
}

// ----------- Num Traits -----------

impl num_traits::Zero for UIntXL {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }
}

impl num_traits::One for UIntXL {
    fn one() -> Self {
        Self::unit()
    }
}
