//! This module provides the generic integer interface shared by native
//! integers, [`DoubleWidth`](crate::DoubleWidth) compositions and
//! flexible-width integers, altogether with the limb level kernels they are
//! built on.

use alloc::vec::Vec;
use core::{
    fmt::Debug,
    hash::Hash,
    iter::FusedIterator,
    ops::{BitAnd, BitOr, BitXor, Not, Range},
};

use zeroize::Zeroize;

pub mod limb;
pub mod limbs;
pub mod tuple;

pub use limb::{Limb, WideLimb};
use tuple::Wide2;

/// Integer that can be observed as a two's complement sequence of [`Limb`]s.
///
/// Every integer kind of this crate implements it, and so do the native
/// integers. It is the common ground for conversions between all of them.
pub trait BinaryInteger {
    /// Returns true if the value is less than zero.
    fn is_negative(&self) -> bool;

    /// Number of [`Limb`]s needed to represent `self` in two's complement.
    ///
    /// Never zero.
    fn word_count(&self) -> usize;

    /// Returns the `index`-th [`Limb`] of the two's complement representation,
    /// from least to most significant.
    ///
    /// Indices past [`Self::word_count`] yield the sign extension.
    fn word(&self, index: usize) -> Limb;

    /// Returns an iterator over the [`Limb`]s of `self`, from least to most
    /// significant.
    fn words(&self) -> Words<'_, Self> {
        Words { integer: self, range: 0..self.word_count() }
    }

    /// Collects the `count` least significant [`Limb`]s, sign extended past
    /// [`Self::word_count`].
    fn low_words(&self, count: usize) -> Vec<Limb> {
        (0..count).map(|index| self.word(index)).collect()
    }
}

/// Limb that extends a two's complement representation of the given sign.
#[inline]
pub(crate) const fn sign_extension(is_negative: bool) -> Limb {
    if is_negative {
        Limb::MAX
    } else {
        0
    }
}

/// Random-access view over the [`Limb`]s of a [`BinaryInteger`].
///
/// Obtained through [`BinaryInteger::words`]. Yields limbs in numeric order
/// independently of the host byte order.
#[derive(Debug)]
pub struct Words<'a, T: BinaryInteger + ?Sized> {
    integer: &'a T,
    range: Range<usize>,
}

impl<T: BinaryInteger + ?Sized> Clone for Words<'_, T> {
    fn clone(&self) -> Self {
        Self { integer: self.integer, range: self.range.clone() }
    }
}

impl<T: BinaryInteger + ?Sized> Words<'_, T> {
    /// Returns the limb at `index` of the remaining view.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Limb> {
        let index = self.range.start.checked_add(index)?;
        (index < self.range.end).then(|| self.integer.word(index))
    }
}

impl<T: BinaryInteger + ?Sized> Iterator for Words<'_, T> {
    type Item = Limb;

    fn next(&mut self) -> Option<Limb> {
        self.range.next().map(|index| self.integer.word(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Limb> {
        self.range.nth(n).map(|index| self.integer.word(index))
    }
}

impl<T: BinaryInteger + ?Sized> DoubleEndedIterator for Words<'_, T> {
    fn next_back(&mut self) -> Option<Limb> {
        self.range.next_back().map(|index| self.integer.word(index))
    }
}

impl<T: BinaryInteger + ?Sized> ExactSizeIterator for Words<'_, T> {}

impl<T: BinaryInteger + ?Sized> FusedIterator for Words<'_, T> {}

/// A limb slice is an unsigned magnitude in little-endian limb order.
impl BinaryInteger for [Limb] {
    fn is_negative(&self) -> bool {
        false
    }

    fn word_count(&self) -> usize {
        // One more limb keeps a set top bit from reading as a sign.
        let trimmed = limbs::trimmed(self);
        match trimmed.last() {
            None => 1,
            Some(top) if top >> (Limb::BITS - 1) == 1 => trimmed.len() + 1,
            Some(_) => trimmed.len(),
        }
    }

    fn word(&self, index: usize) -> Limb {
        self.get(index).copied().unwrap_or(0)
    }
}

/// Fixed-width two's complement integer.
///
/// This is the capability set a half of a
/// [`DoubleWidth`](crate::DoubleWidth) integer must provide, which makes the
/// composition recursive: every [`DoubleWidth`](crate::DoubleWidth) is itself
/// a [`FixedWidthInteger`].
///
/// Operations suffixed with `reporting_overflow` never fail: they return the
/// wrapped result along with an overflow flag.
pub trait FixedWidthInteger:
    'static
    + Copy
    + Clone
    + Debug
    + Default
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + Zeroize
    + BinaryInteger
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    /// Unsigned integer of the same width.
    type Magnitude: UnsignedInteger;

    /// Number of bits in the representation.
    const BITS: u32;

    /// Whether the most significant bit carries the sign.
    const IS_SIGNED: bool;

    /// Number of [`Limb`]s in the [`BinaryInteger::words`] view.
    const WORD_COUNT: usize;

    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Smallest representable value.
    const MIN: Self;

    /// Largest representable value.
    const MAX: Self;

    /// Reinterprets the bits of an unsigned value of the same width.
    fn from_bit_pattern(bits: Self::Magnitude) -> Self;

    /// Reinterprets `self` as an unsigned value of the same width.
    fn bit_pattern(self) -> Self::Magnitude;

    /// Adds `rhs` to `self`, returning the wrapped sum and whether overflow
    /// occurred.
    fn add_reporting_overflow(self, rhs: Self) -> (Self, bool);

    /// Subtracts `rhs` from `self`, returning the wrapped difference and
    /// whether overflow occurred.
    fn sub_reporting_overflow(self, rhs: Self) -> (Self, bool);

    /// Multiplies `self` by `rhs`, returning the wrapped product and whether
    /// overflow occurred.
    fn mul_reporting_overflow(self, rhs: Self) -> (Self, bool);

    /// Returns the exact product as its `(high, low)` halves.
    fn multiplied_full_width(self, rhs: Self) -> (Self, Self::Magnitude);

    /// Returns the truncated quotient and the remainder, and whether overflow
    /// occurred.
    ///
    /// Overflow only happens for `MIN / -1` of signed types, where the
    /// wrapped results are `(MIN, 0)`.
    ///
    /// # Panics
    ///
    /// * If `rhs` is zero.
    fn div_rem_reporting_overflow(self, rhs: Self) -> ((Self, Self), bool);

    /// Number of leading zero bits.
    fn leading_zero_bit_count(self) -> u32;

    /// Number of trailing zero bits.
    fn trailing_zero_bit_count(self) -> u32;

    /// Number of one bits.
    fn nonzero_bit_count(self) -> u32;

    /// Shifts left by `amount` modulo [`Self::BITS`].
    fn masked_shl(self, amount: u32) -> Self;

    /// Shifts right by `amount` modulo [`Self::BITS`], filling with the sign
    /// bit of signed types.
    fn masked_shr(self, amount: u32) -> Self;

    /// Builds an integer from little-endian `words`, discarding the bits that
    /// do not fit. Missing words read as zero.
    fn truncating_from_words(words: &[Limb]) -> Self;

    /// Returns `!self + 1`, wrapping around.
    #[must_use]
    fn twos_complement(self) -> Self {
        (!self).add_reporting_overflow(Self::ONE).0
    }

    /// Returns the absolute value as an unsigned integer of the same width.
    fn magnitude(self) -> Self::Magnitude {
        if self.is_negative() {
            self.bit_pattern().twos_complement()
        } else {
            self.bit_pattern()
        }
    }

    /// Returns `-self`, and whether overflow occurred.
    fn negate_reporting_overflow(self) -> (Self, bool) {
        Self::ZERO.sub_reporting_overflow(self)
    }

    /// Converts `source` when its value is representable by `Self`.
    fn exactly<S: BinaryInteger + ?Sized>(source: &S) -> Option<Self> {
        let words =
            source.low_words(source.word_count().max(Self::WORD_COUNT));
        let (low, high) = words.split_at(Self::WORD_COUNT);
        let value = Self::truncating_from_words(low);

        let is_negative = source.is_negative();
        let extension = sign_extension(is_negative);
        let fits = value.is_negative() == is_negative
            && low
                .iter()
                .enumerate()
                .all(|(index, &word)| value.word(index) == word)
            && high.iter().all(|&word| word == extension);

        fits.then_some(value)
    }

    /// Converts `source`, saturating at [`Self::MIN`] and [`Self::MAX`].
    fn clamping<S: BinaryInteger + ?Sized>(source: &S) -> Self {
        match Self::exactly(source) {
            Some(value) => value,
            None if source.is_negative() => Self::MIN,
            None => Self::MAX,
        }
    }

    /// Converts `source`, keeping only the low [`Self::BITS`] bits.
    fn truncating<S: BinaryInteger + ?Sized>(source: &S) -> Self {
        Self::truncating_from_words(&source.low_words(Self::WORD_COUNT))
    }

    /// Converts `source`.
    ///
    /// # Panics
    ///
    /// * If the value of `source` is not representable by `Self`.
    fn from_integer<S: BinaryInteger + ?Sized>(source: &S) -> Self {
        match Self::exactly(source) {
            Some(value) => value,
            None => panic!("integer out of range"),
        }
    }
}

/// Unsigned [`FixedWidthInteger`], its own magnitude.
pub trait UnsignedInteger: FixedWidthInteger<Magnitude = Self> {
    /// Divides the double-width value `dividend = (high, low)` by `self`,
    /// returning the quotient and the remainder.
    ///
    /// # Panics
    ///
    /// * If `self` is zero.
    /// * If `high >= self`, since the quotient would not fit.
    fn dividing_full_width(self, dividend: Wide2<Self>) -> Wide2<Self>;
}

/// Extracts the sign and the trimmed magnitude limbs of `source`.
pub(crate) fn sign_and_magnitude_limbs<S: BinaryInteger + ?Sized>(
    source: &S,
) -> (bool, Vec<Limb>) {
    let is_negative = source.is_negative();
    let mut magnitude = source.low_words(source.word_count());
    if is_negative {
        limbs::form_twos_complement(&mut magnitude);
    }
    limbs::trim(&mut magnitude);
    (is_negative, magnitude)
}

/// [`BinaryInteger`] for natives that fit a single [`Limb`].
macro_rules! impl_binary_integer_native {
    ($($int:ty),*) => {$(
        impl BinaryInteger for $int {
            #[allow(unused_comparisons)]
            fn is_negative(&self) -> bool {
                *self < 0
            }

            fn word_count(&self) -> usize {
                1
            }

            #[allow(clippy::cast_sign_loss, clippy::cast_lossless)]
            fn word(&self, index: usize) -> Limb {
                // Signed natives are sign extended by the cast.
                if index == 0 {
                    *self as Limb
                } else {
                    sign_extension(self.is_negative())
                }
            }
        }
    )*};
}

impl_binary_integer_native!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// [`BinaryInteger`] for natives spanning two [`Limb`]s.
macro_rules! impl_binary_integer_native_wide {
    ($($int:ty),*) => {$(
        impl BinaryInteger for $int {
            #[allow(unused_comparisons)]
            fn is_negative(&self) -> bool {
                *self < 0
            }

            fn word_count(&self) -> usize {
                2
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn word(&self, index: usize) -> Limb {
                match index {
                    0 => *self as Limb,
                    1 => (*self >> Limb::BITS) as Limb,
                    _ => sign_extension(self.is_negative()),
                }
            }
        }
    )*};
}

impl_binary_integer_native_wide!(u128, i128);

/// [`FixedWidthInteger`] for natives, using the twice wider native as the
/// full-width product.
macro_rules! impl_fixed_width_native {
    ($int:ty, $magnitude:ty, $wide:ty, $signed:literal) => {
        impl FixedWidthInteger for $int {
            type Magnitude = $magnitude;

            const BITS: u32 = <$int>::BITS;
            const IS_SIGNED: bool = $signed;
            const MAX: Self = <$int>::MAX;
            const MIN: Self = <$int>::MIN;
            const ONE: Self = 1;
            const WORD_COUNT: usize = 1;
            const ZERO: Self = 0;

            #[inline]
            #[allow(clippy::cast_possible_wrap)]
            fn from_bit_pattern(bits: $magnitude) -> Self {
                bits as $int
            }

            #[inline]
            #[allow(clippy::cast_sign_loss)]
            fn bit_pattern(self) -> $magnitude {
                self as $magnitude
            }

            #[inline]
            fn add_reporting_overflow(self, rhs: Self) -> (Self, bool) {
                self.overflowing_add(rhs)
            }

            #[inline]
            fn sub_reporting_overflow(self, rhs: Self) -> (Self, bool) {
                self.overflowing_sub(rhs)
            }

            #[inline]
            fn mul_reporting_overflow(self, rhs: Self) -> (Self, bool) {
                self.overflowing_mul(rhs)
            }

            #[inline]
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_lossless
            )]
            fn multiplied_full_width(self, rhs: Self) -> (Self, $magnitude) {
                let product = <$wide>::from(self) * <$wide>::from(rhs);
                ((product >> <$int>::BITS) as $int, product as $magnitude)
            }

            #[inline]
            fn div_rem_reporting_overflow(
                self,
                rhs: Self,
            ) -> ((Self, Self), bool) {
                assert!(rhs != 0, "attempt to divide by zero");
                let (quotient, overflow) = self.overflowing_div(rhs);
                let (remainder, _) = self.overflowing_rem(rhs);
                ((quotient, remainder), overflow)
            }

            #[inline]
            fn leading_zero_bit_count(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn trailing_zero_bit_count(self) -> u32 {
                self.trailing_zeros()
            }

            #[inline]
            fn nonzero_bit_count(self) -> u32 {
                self.count_ones()
            }

            #[inline]
            fn masked_shl(self, amount: u32) -> Self {
                self.wrapping_shl(amount)
            }

            #[inline]
            fn masked_shr(self, amount: u32) -> Self {
                self.wrapping_shr(amount)
            }

            #[inline]
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap
            )]
            fn truncating_from_words(words: &[Limb]) -> Self {
                words.first().map_or(0, |&word| word as $int)
            }
        }
    };
}

impl_fixed_width_native!(u8, u8, u16, false);
impl_fixed_width_native!(u16, u16, u32, false);
impl_fixed_width_native!(u32, u32, u64, false);
impl_fixed_width_native!(u64, u64, u128, false);
impl_fixed_width_native!(i8, u8, i16, true);
impl_fixed_width_native!(i16, u16, i32, true);
impl_fixed_width_native!(i32, u32, i64, true);
impl_fixed_width_native!(i64, u64, i128, true);

/// [`UnsignedInteger`] for natives, dividing through the twice wider native.
macro_rules! impl_unsigned_native {
    ($int:ty, $wide:ty) => {
        impl UnsignedInteger for $int {
            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
            fn dividing_full_width(self, dividend: Wide2<Self>) -> Wide2<Self> {
                let (high, low) = dividend;
                assert!(self != 0, "attempt to divide by zero");
                assert!(high < self, "quotient overflows the divisor width");
                let dividend =
                    (<$wide>::from(high) << <$int>::BITS) | <$wide>::from(low);
                let divisor = <$wide>::from(self);
                ((dividend / divisor) as $int, (dividend % divisor) as $int)
            }
        }
    };
}

impl_unsigned_native!(u8, u16);
impl_unsigned_native!(u16, u32);
impl_unsigned_native!(u32, u64);

impl UnsignedInteger for u64 {
    #[inline]
    fn dividing_full_width(self, dividend: Wide2<Self>) -> Wide2<Self> {
        let (high, low) = dividend;
        limb::div_wide(high, low, self)
    }
}
