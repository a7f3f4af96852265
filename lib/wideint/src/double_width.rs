//! This module contains the [`DoubleWidth`] fixed-width integer, composed of
//! two halves of a narrower [`FixedWidthInteger`], altogether with its
//! instantiations [`UInt128`] and [`Int128`] for 128 bits, and so on.
//!
//! The composition is recursive: `DoubleWidth<DoubleWidth<u64>>` is a 256-bit
//! unsigned integer, and the signedness of the whole is the signedness of the
//! innermost high half.

use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{self, Binary, Debug, Display, LowerHex, Octal, UpperHex},
    hash::{Hash, Hasher},
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor,
        BitXorAssign, Div, DivAssign, Mul, MulAssign, Neg, Not, Rem,
        RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
    },
    str::FromStr,
};

use educe::Educe;
use zeroize::Zeroize;

use crate::{
    arithmetic::{
        sign_extension,
        tuple::{self, Wide2},
        BinaryInteger, FixedWidthInteger, Limb, UnsignedInteger,
    },
    bits::BitIteratorBE,
    error::ParseIntegerError,
    text::{self, TextCodec},
};

/// Fixed-width integer made of a `high` half and an unsigned `low` half.
///
/// Its value is `high * 2^H::BITS + low`, where `high` carries the sign when
/// `H` is signed.
#[derive(Educe)]
#[educe(Copy, Clone, PartialEq, Eq, Default)]
#[repr(C)]
pub struct DoubleWidth<H: FixedWidthInteger> {
    low: H::Magnitude,
    high: H,
}

/// Declare [`DoubleWidth`] types for different bit sizes.
macro_rules! declare_num {
    ($num:ident, $half:ty, $bits:expr, $kind:literal) => {
        #[doc = $kind]
        #[doc = " integer with "]
        #[doc = stringify!($bits)]
        #[doc = " bits size."]
        pub type $num = DoubleWidth<$half>;
    };
}

declare_num!(UInt128, u64, 128, "Unsigned");
declare_num!(UInt256, UInt128, 256, "Unsigned");
declare_num!(UInt512, UInt256, 512, "Unsigned");
declare_num!(UInt1024, UInt512, 1024, "Unsigned");
declare_num!(Int128, i64, 128, "Signed");
declare_num!(Int256, Int128, 256, "Signed");
declare_num!(Int512, Int256, 512, "Signed");
declare_num!(Int1024, Int512, 1024, "Signed");

impl<H: FixedWidthInteger> DoubleWidth<H> {
    /// Create a new [`DoubleWidth`] from its `high` and `low` halves.
    #[must_use]
    pub const fn new(high: H, low: H::Magnitude) -> Self {
        Self { low, high }
    }

    /// Returns the high half.
    #[must_use]
    pub fn high(&self) -> H {
        self.high
    }

    /// Returns the low half.
    #[must_use]
    pub fn low(&self) -> H::Magnitude {
        self.low
    }

    /// Returns the `(high, low)` halves.
    #[must_use]
    pub fn into_parts(self) -> (H, H::Magnitude) {
        (self.high, self.low)
    }

    /// Replaces `self` with `!self + 1`, wrapping around.
    pub fn form_twos_complement(&mut self) {
        *self = self.twos_complement();
    }

    /// Returns the truncated quotient and the remainder.
    ///
    /// # Panics
    ///
    /// * If `rhs` is zero.
    /// * If the quotient overflows, i.e. `MIN / -1`.
    #[must_use]
    pub fn div_rem(self, rhs: Self) -> (Self, Self) {
        let (result, overflow) = self.div_rem_reporting_overflow(rhs);
        assert!(!overflow, "attempt to divide with overflow");
        result
    }

    /// Returns the number of bits needed to represent `self` without its sign
    /// extension.
    #[must_use]
    pub fn bit_width(self) -> u32 {
        let bits = if self.is_negative() { !self } else { self };
        Self::BITS - bits.leading_zero_bit_count()
    }
}

impl<H: FixedWidthInteger> From<H> for DoubleWidth<H> {
    /// Widens `half`, extending its sign.
    fn from(half: H) -> Self {
        let high = if half.is_negative() { !H::ZERO } else { H::ZERO };
        let low = half.bit_pattern();
        Self { low, high }
    }
}

// ----------- Integer Capabilities -----------

impl<H: FixedWidthInteger> BinaryInteger for DoubleWidth<H> {
    fn is_negative(&self) -> bool {
        self.high.is_negative()
    }

    fn word_count(&self) -> usize {
        Self::WORD_COUNT
    }

    fn word(&self, index: usize) -> Limb {
        if index >= Self::WORD_COUNT {
            return sign_extension(self.is_negative());
        }
        if H::BITS >= Limb::BITS {
            let split = <H::Magnitude as FixedWidthInteger>::WORD_COUNT;
            if index < split {
                self.low.word(index)
            } else {
                self.high.word(index - split)
            }
        } else {
            // Narrower than a limb: the high word is sign extended.
            (self.high.word(0) << H::BITS) | self.low.word(0)
        }
    }
}

impl<H: FixedWidthInteger> FixedWidthInteger for DoubleWidth<H> {
    type Magnitude = DoubleWidth<H::Magnitude>;

    const BITS: u32 = 2 * H::BITS;
    const IS_SIGNED: bool = H::IS_SIGNED;
    const MAX: Self =
        Self { low: <H::Magnitude as FixedWidthInteger>::MAX, high: H::MAX };
    const MIN: Self =
        Self { low: <H::Magnitude as FixedWidthInteger>::ZERO, high: H::MIN };
    const ONE: Self =
        Self { low: <H::Magnitude as FixedWidthInteger>::ONE, high: H::ZERO };
    const WORD_COUNT: usize =
        if H::BITS >= Limb::BITS { 2 * H::WORD_COUNT } else { 1 };
    const ZERO: Self =
        Self { low: <H::Magnitude as FixedWidthInteger>::ZERO, high: H::ZERO };

    #[inline]
    fn from_bit_pattern(bits: Self::Magnitude) -> Self {
        Self { low: bits.low, high: H::from_bit_pattern(bits.high) }
    }

    #[inline]
    fn bit_pattern(self) -> Self::Magnitude {
        DoubleWidth { low: self.low, high: self.high.bit_pattern() }
    }

    #[inline]
    fn add_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        let ((high, low), overflow) =
            tuple::wide_add::<H>((self.high, self.low), (rhs.high, rhs.low));
        (Self { low, high }, overflow)
    }

    #[inline]
    fn sub_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        let ((high, low), overflow) =
            tuple::wide_sub::<H>((self.high, self.low), (rhs.high, rhs.low));
        (Self { low, high }, overflow)
    }

    fn mul_reporting_overflow(self, rhs: Self) -> (Self, bool) {
        let (high, low) = self.multiplied_full_width(rhs);
        let product = Self::from_bit_pattern(low);
        // The high half must be the sign extension of the low one.
        let extension =
            if product.is_negative() { !Self::ZERO } else { Self::ZERO };
        (product, high != extension)
    }

    fn multiplied_full_width(self, rhs: Self) -> (Self, Self::Magnitude) {
        let is_negative = self.is_negative() != rhs.is_negative();
        let (high, low) = full_width_product(self.magnitude(), rhs.magnitude());
        let (high, low) = if is_negative {
            let zero = DoubleWidth::<H::Magnitude>::ZERO;
            tuple::wide_sub::<Self::Magnitude>((zero, zero), (high, low)).0
        } else {
            (high, low)
        };
        (Self::from_bit_pattern(high), low)
    }

    fn div_rem_reporting_overflow(self, rhs: Self) -> ((Self, Self), bool) {
        assert!(rhs != Self::ZERO, "attempt to divide by zero");
        if Self::IS_SIGNED && self == Self::MIN && rhs == !Self::ZERO {
            return ((Self::MIN, Self::ZERO), true);
        }

        let (quotient, remainder) =
            divide_unsigned(self.magnitude(), rhs.magnitude());
        let quotient = if self.is_negative() == rhs.is_negative() {
            quotient
        } else {
            quotient.twos_complement()
        };
        let remainder = if self.is_negative() {
            remainder.twos_complement()
        } else {
            remainder
        };
        let quotient = Self::from_bit_pattern(quotient);
        ((quotient, Self::from_bit_pattern(remainder)), false)
    }

    fn leading_zero_bit_count(self) -> u32 {
        if self.high == H::ZERO {
            H::BITS + self.low.leading_zero_bit_count()
        } else {
            self.high.leading_zero_bit_count()
        }
    }

    fn trailing_zero_bit_count(self) -> u32 {
        if self.low == <H::Magnitude as FixedWidthInteger>::ZERO {
            H::BITS + self.high.trailing_zero_bit_count()
        } else {
            self.low.trailing_zero_bit_count()
        }
    }

    fn nonzero_bit_count(self) -> u32 {
        self.high.nonzero_bit_count() + self.low.nonzero_bit_count()
    }

    fn masked_shl(self, amount: u32) -> Self {
        let amount = amount % Self::BITS;
        if amount == 0 {
            self
        } else if amount >= H::BITS {
            let high = self.low.masked_shl(amount - H::BITS);
            Self {
                low: <H::Magnitude as FixedWidthInteger>::ZERO,
                high: H::from_bit_pattern(high),
            }
        } else {
            let carry =
                H::from_bit_pattern(self.low.masked_shr(H::BITS - amount));
            Self {
                low: self.low.masked_shl(amount),
                high: self.high.masked_shl(amount) | carry,
            }
        }
    }

    fn masked_shr(self, amount: u32) -> Self {
        let amount = amount % Self::BITS;
        if amount == 0 {
            self
        } else if amount >= H::BITS {
            let fill = if self.is_negative() { !H::ZERO } else { H::ZERO };
            Self {
                low: self.high.masked_shr(amount - H::BITS).bit_pattern(),
                high: fill,
            }
        } else {
            let carry = self.high.bit_pattern().masked_shl(H::BITS - amount);
            Self {
                low: self.low.masked_shr(amount) | carry,
                high: self.high.masked_shr(amount),
            }
        }
    }

    fn truncating_from_words(words: &[Limb]) -> Self {
        if H::BITS >= Limb::BITS {
            let split = <H::Magnitude as FixedWidthInteger>::WORD_COUNT;
            let (low, high) = words.split_at(split.min(words.len()));
            Self {
                low: FixedWidthInteger::truncating_from_words(low),
                high: H::truncating_from_words(high),
            }
        } else {
            let word = words.first().copied().unwrap_or(0);
            Self {
                low: FixedWidthInteger::truncating_from_words(&[word]),
                high: H::truncating_from_words(&[word >> H::BITS]),
            }
        }
    }
}

impl<L: UnsignedInteger> UnsignedInteger for DoubleWidth<L> {
    /// Divides a four-half dividend by `self`, dividing either by a single half
    /// when the high half of `self` is zero, or through two 3-by-2 steps on the
    /// normalized operands otherwise.
    fn dividing_full_width(self, dividend: Wide2<Self>) -> Wide2<Self> {
        assert!(self != Self::ZERO, "attempt to divide by zero");
        assert!(dividend.0 < self, "quotient overflows the divisor width");
        let (high, low) = dividend;

        if self.high == L::ZERO {
            let (upper, remainder) =
                self.low.dividing_full_width((high.low, low.high));
            let (lower, remainder) =
                self.low.dividing_full_width((remainder, low.low));
            return (
                Self { low: lower, high: upper },
                Self { low: remainder, high: L::ZERO },
            );
        }

        let shift = self.high.leading_zero_bit_count();
        let divisor = self.masked_shl(shift);
        let (high, low) = if shift == 0 {
            (high, low)
        } else {
            (
                high.masked_shl(shift) | low.masked_shr(Self::BITS - shift),
                low.masked_shl(shift),
            )
        };

        let divisor = (divisor.high, divisor.low);
        let (upper, remainder) =
            tuple::divide3by2((high.high, high.low, low.high), divisor);
        let (lower, remainder) =
            tuple::divide3by2((remainder.0, remainder.1, low.low), divisor);
        let remainder = Self { low: remainder.1, high: remainder.0 };
        (Self { low: lower, high: upper }, remainder.masked_shr(shift))
    }
}

/// Returns the exact product of two unsigned values as `(high, low)` halves,
/// combining the four half-by-half partial products.
fn full_width_product<L: UnsignedInteger>(
    lhs: DoubleWidth<L>,
    rhs: DoubleWidth<L>,
) -> Wide2<DoubleWidth<L>> {
    let (carry, low) = tuple::multiply_full(lhs.low, rhs.low);
    let cross = tuple::multiply_full(lhs.high, rhs.low);
    let inner = tuple::multiply_full(lhs.low, rhs.high);
    let (top, high) = tuple::multiply_full(lhs.high, rhs.high);

    let mut upper = (top, high, carry);
    let overflow = tuple::increment_wide3(&mut upper, cross)
        | tuple::increment_wide3(&mut upper, inner);
    debug_assert!(!overflow);

    let (top, high, mid) = upper;
    (DoubleWidth { low: high, high: top }, DoubleWidth { low, high: mid })
}

/// Returns the quotient and the remainder of two unsigned values.
fn divide_unsigned<L: UnsignedInteger>(
    dividend: DoubleWidth<L>,
    divisor: DoubleWidth<L>,
) -> Wide2<DoubleWidth<L>> {
    if dividend < divisor {
        return (DoubleWidth::<L>::ZERO, dividend);
    }

    if divisor.high == L::ZERO {
        let ((upper, remainder), _) =
            dividend.high.div_rem_reporting_overflow(divisor.low);
        let (lower, remainder) =
            divisor.low.dividing_full_width((remainder, dividend.low));
        return (
            DoubleWidth { low: lower, high: upper },
            DoubleWidth { low: remainder, high: L::ZERO },
        );
    }

    // The quotient fits a single half, found by a 3-by-2 step on the
    // normalized operands.
    let shift = divisor.high.leading_zero_bit_count();
    let divisor = divisor.masked_shl(shift);
    let top = if shift == 0 {
        L::ZERO
    } else {
        dividend.high.masked_shr(L::BITS - shift)
    };
    let dividend = dividend.masked_shl(shift);
    let (quotient, (high, low)) = tuple::divide3by2(
        (top, dividend.high, dividend.low),
        (divisor.high, divisor.low),
    );
    (
        DoubleWidth { low: quotient, high: L::ZERO },
        DoubleWidth { low, high }.masked_shr(shift),
    )
}

// ----------- Traits Impls -----------

impl<H: FixedWidthInteger> Ord for DoubleWidth<H> {
    #[inline]
    fn cmp(&self, rhs: &Self) -> Ordering {
        self.high.cmp(&rhs.high).then_with(|| self.low.cmp(&rhs.low))
    }
}

impl<H: FixedWidthInteger> Hash for DoubleWidth<H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.low.hash(state);
        self.high.hash(state);
    }
}

impl<H: FixedWidthInteger> PartialOrd for DoubleWidth<H> {
    #[inline]
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl<H: FixedWidthInteger> Zeroize for DoubleWidth<H> {
    fn zeroize(&mut self) {
        self.low.zeroize();
        self.high.zeroize();
    }
}

impl<H: FixedWidthInteger> Display for DoubleWidth<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(self, f, 10, "", false)
    }
}

impl<H: FixedWidthInteger> Debug for DoubleWidth<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

// Radix formatting prints the two's complement bit pattern, as natives do.

impl<H: FixedWidthInteger> LowerHex for DoubleWidth<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(&self.bit_pattern(), f, 16, "0x", false)
    }
}

impl<H: FixedWidthInteger> UpperHex for DoubleWidth<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(&self.bit_pattern(), f, 16, "0x", true)
    }
}

impl<H: FixedWidthInteger> Octal for DoubleWidth<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(&self.bit_pattern(), f, 8, "0o", false)
    }
}

impl<H: FixedWidthInteger> Binary for DoubleWidth<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::fmt_radix(&self.bit_pattern(), f, 2, "0b", false)
    }
}

impl<H: FixedWidthInteger> FromStr for DoubleWidth<H> {
    type Err = ParseIntegerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

impl<H: FixedWidthInteger> BitIteratorBE for DoubleWidth<H> {
    fn bit_be_iter(&self) -> impl Iterator<Item = bool> {
        let value = *self;
        (0..Self::BITS).rev().map(move |index| {
            let word = value.word((index / Limb::BITS) as usize);
            word >> (index % Limb::BITS) & 1 == 1
        })
    }
}

// ----------- Operators -----------

impl<H: FixedWidthInteger> Not for DoubleWidth<H> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self { low: !self.low, high: !self.high }
    }
}

macro_rules! impl_bit_op {
    (
        $trait:ident,
        $method:ident,
        $assign_trait:ident,
        $assign_method:ident,
        $op:tt
    ) => {
        impl<H: FixedWidthInteger, B: Borrow<Self>> $assign_trait<B>
            for DoubleWidth<H>
        {
            fn $assign_method(&mut self, rhs: B) {
                let rhs = rhs.borrow();
                self.low = self.low $op rhs.low;
                self.high = self.high $op rhs.high;
            }
        }

        impl<H: FixedWidthInteger, B: Borrow<Self>> $trait<B>
            for DoubleWidth<H>
        {
            type Output = Self;

            fn $method(mut self, rhs: B) -> Self::Output {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

/// Arithmetic operators trapping on overflow, as native integers do in debug
/// builds.
macro_rules! impl_trapping_op {
    (
        $trait:ident,
        $method:ident,
        $assign_trait:ident,
        $assign_method:ident,
        $reporting:ident,
        $message:literal
    ) => {
        impl<H: FixedWidthInteger, B: Borrow<Self>> $trait<B>
            for DoubleWidth<H>
        {
            type Output = Self;

            #[track_caller]
            fn $method(self, rhs: B) -> Self::Output {
                let (result, overflow) = self.$reporting(*rhs.borrow());
                assert!(!overflow, $message);
                result
            }
        }

        impl<H: FixedWidthInteger, B: Borrow<Self>> $assign_trait<B>
            for DoubleWidth<H>
        {
            #[track_caller]
            fn $assign_method(&mut self, rhs: B) {
                *self = $trait::$method(*self, rhs);
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

impl<H: FixedWidthInteger, B: Borrow<Self>> Div<B> for DoubleWidth<H> {
    type Output = Self;

    #[track_caller]
    fn div(self, rhs: B) -> Self::Output {
        let ((quotient, _), overflow) =
            self.div_rem_reporting_overflow(*rhs.borrow());
        assert!(!overflow, "attempt to divide with overflow");
        quotient
    }
}

impl<H: FixedWidthInteger, B: Borrow<Self>> DivAssign<B> for DoubleWidth<H> {
    #[track_caller]
    fn div_assign(&mut self, rhs: B) {
        *self = *self / rhs;
    }
}

impl<H: FixedWidthInteger, B: Borrow<Self>> Rem<B> for DoubleWidth<H> {
    type Output = Self;

    #[track_caller]
    fn rem(self, rhs: B) -> Self::Output {
        let ((_, remainder), overflow) =
            self.div_rem_reporting_overflow(*rhs.borrow());
        assert!(!overflow, "attempt to calculate the remainder with overflow");
        remainder
    }
}

impl<H: FixedWidthInteger, B: Borrow<Self>> RemAssign<B> for DoubleWidth<H> {
    #[track_caller]
    fn rem_assign(&mut self, rhs: B) {
        *self = *self % rhs;
    }
}

impl<H: FixedWidthInteger> Neg for DoubleWidth<H> {
    type Output = Self;

    #[track_caller]
    fn neg(self) -> Self::Output {
        let (result, overflow) = self.negate_reporting_overflow();
        assert!(!overflow, "attempt to negate with overflow");
        result
    }
}

/// Shifts by any amount: shifting out every bit yields zero, or minus one for
/// a negative value shifted right.
impl<H: FixedWidthInteger> Shl<u32> for DoubleWidth<H> {
    type Output = Self;

    fn shl(self, amount: u32) -> Self::Output {
        if amount >= Self::BITS {
            Self::ZERO
        } else {
            self.masked_shl(amount)
        }
    }
}

impl<H: FixedWidthInteger> Shr<u32> for DoubleWidth<H> {
    type Output = Self;

    fn shr(self, amount: u32) -> Self::Output {
        if amount < Self::BITS {
            self.masked_shr(amount)
        } else if self.is_negative() {
            !Self::ZERO
        } else {
            Self::ZERO
        }
    }
}

impl<H: FixedWidthInteger> ShlAssign<u32> for DoubleWidth<H> {
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl<H: FixedWidthInteger> ShrAssign<u32> for DoubleWidth<H> {
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}

// ----------- Num Traits -----------

impl<H: FixedWidthInteger> num_traits::Zero for DoubleWidth<H> {
    fn zero() -> Self {
        <Self as FixedWidthInteger>::ZERO
    }

    fn is_zero(&self) -> bool {
        *self == <Self as FixedWidthInteger>::ZERO
    }
}

impl<H: FixedWidthInteger> num_traits::One for DoubleWidth<H> {
    fn one() -> Self {
        <Self as FixedWidthInteger>::ONE
    }
}

impl<H: FixedWidthInteger> num_traits::ConstZero for DoubleWidth<H> {
    const ZERO: Self = <Self as FixedWidthInteger>::ZERO;
}

impl<H: FixedWidthInteger> num_traits::ConstOne for DoubleWidth<H> {
    const ONE: Self = <Self as FixedWidthInteger>::ONE;
}

impl<H: FixedWidthInteger> num_traits::Bounded for DoubleWidth<H> {
    fn min_value() -> Self {
        <Self as FixedWidthInteger>::MIN
    }

    fn max_value() -> Self {
        <Self as FixedWidthInteger>::MAX
    }
}

macro_rules! impl_reporting_num_traits {
    (
        $checked:ident,
        $checked_method:ident,
        $wrapping:ident,
        $wrapping_method:ident,
        $overflowing:ident,
        $overflowing_method:ident,
        $reporting:ident
    ) => {
        impl<H: FixedWidthInteger> num_traits::$checked for DoubleWidth<H> {
            fn $checked_method(&self, v: &Self) -> Option<Self> {
                let (result, overflow) = self.$reporting(*v);
                (!overflow).then_some(result)
            }
        }

        impl<H: FixedWidthInteger> num_traits::$wrapping for DoubleWidth<H> {
            fn $wrapping_method(&self, v: &Self) -> Self {
                self.$reporting(*v).0
            }
        }

        impl<H: FixedWidthInteger> num_traits::ops::overflowing::$overflowing
            for DoubleWidth<H>
        {
            fn $overflowing_method(&self, v: &Self) -> (Self, bool) {
                self.$reporting(*v)
            }
        }
    };
}

impl_reporting_num_traits!(
    CheckedAdd,
    checked_add,
    WrappingAdd,
    wrapping_add,
    OverflowingAdd,
    overflowing_add,
    add_reporting_overflow
);
impl_reporting_num_traits!(
    CheckedSub,
    checked_sub,
    WrappingSub,
    wrapping_sub,
    OverflowingSub,
    overflowing_sub,
    sub_reporting_overflow
);
impl_reporting_num_traits!(
    CheckedMul,
    checked_mul,
    WrappingMul,
    wrapping_mul,
    OverflowingMul,
    overflowing_mul,
    mul_reporting_overflow
);

impl<H: FixedWidthInteger> num_traits::CheckedDiv for DoubleWidth<H> {
    fn checked_div(&self, v: &Self) -> Option<Self> {
        if *v == <Self as FixedWidthInteger>::ZERO {
            return None;
        }
        let ((quotient, _), overflow) = self.div_rem_reporting_overflow(*v);
        (!overflow).then_some(quotient)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_traits::{CheckedDiv, WrappingAdd, WrappingSub};
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    use super::*;
    use crate::test_helpers::to_bigint;

    fn to_words<T: FixedWidthInteger>(value: T) -> Vec<Limb> {
        value.words().collect()
    }

    type UInt16 = DoubleWidth<u8>;
    type Int16 = DoubleWidth<i8>;
    type UInt32 = DoubleWidth<DoubleWidth<u8>>;
    type Int32 = DoubleWidth<DoubleWidth<i8>>;

    assert_eq_size!(UInt16, u16);
    assert_eq_size!(UInt128, [u64; 2]);
    assert_eq_size!(Int256, [u64; 4]);
    assert_eq_size!(UInt1024, [u64; 16]);

    fn uint16(value: u16) -> UInt16 {
        UInt16::new((value >> 8) as u8, value as u8)
    }

    fn int16(value: i16) -> Int16 {
        Int16::new((value >> 8) as i8, value as u8)
    }

    fn int32(value: i32) -> Int32 {
        Int32::truncating(&value)
    }

    fn uint128(value: u128) -> UInt128 {
        UInt128::new((value >> 64) as u64, value as u64)
    }

    fn int128(value: i128) -> Int128 {
        Int128::new((value >> 64) as i64, value as u64)
    }

    fn int256() -> impl Strategy<Value = Int256> {
        any::<[u64; 4]>()
            .prop_map(|words| Int256::truncating_from_words(&words))
    }

    fn uint256() -> impl Strategy<Value = UInt256> {
        any::<[u64; 4]>()
            .prop_map(|words| UInt256::truncating_from_words(&words))
    }

    #[test]
    fn full_width_product_of_max_words() {
        let max = UInt128::from(u64::MAX);
        let (high, low) = max.multiplied_full_width(max);
        assert_eq!(high, UInt128::ZERO);
        assert_eq!(low, UInt128::new(u64::MAX - 1, 1));
        assert_eq!(
            max * max,
            uint128(0xFFFF_FFFF_FFFF_FFFE_0000_0000_0000_0001)
        );
    }

    #[test]
    fn arithmetic_agrees_with_u16() {
        proptest!(|(lhs: u16, rhs: u16)| {
            let (a, b) = (uint16(lhs), uint16(rhs));
            let (sum, overflow) = lhs.overflowing_add(rhs);
            prop_assert_eq!(
                a.add_reporting_overflow(b),
                (uint16(sum), overflow)
            );
            let (difference, overflow) = lhs.overflowing_sub(rhs);
            prop_assert_eq!(
                a.sub_reporting_overflow(b),
                (uint16(difference), overflow)
            );
            let (product, overflow) = lhs.overflowing_mul(rhs);
            prop_assert_eq!(
                a.mul_reporting_overflow(b),
                (uint16(product), overflow)
            );
            let full = u32::from(lhs) * u32::from(rhs);
            prop_assert_eq!(
                a.multiplied_full_width(b),
                (uint16((full >> 16) as u16), uint16(full as u16))
            );
            if rhs != 0 {
                prop_assert_eq!(
                    a.div_rem(b),
                    (uint16(lhs / rhs), uint16(lhs % rhs))
                );
            }
        });
    }

    #[test]
    fn arithmetic_agrees_with_i16() {
        proptest!(|(lhs: i16, rhs: i16)| {
            let (a, b) = (int16(lhs), int16(rhs));
            let (sum, overflow) = lhs.overflowing_add(rhs);
            prop_assert_eq!(
                a.add_reporting_overflow(b),
                (int16(sum), overflow)
            );
            let (difference, overflow) = lhs.overflowing_sub(rhs);
            prop_assert_eq!(
                a.sub_reporting_overflow(b),
                (int16(difference), overflow)
            );
            let (product, overflow) = lhs.overflowing_mul(rhs);
            prop_assert_eq!(
                a.mul_reporting_overflow(b),
                (int16(product), overflow)
            );
            if rhs != 0 {
                let (quotient, overflow) = lhs.overflowing_div(rhs);
                let remainder = lhs.wrapping_rem(rhs);
                prop_assert_eq!(
                    a.div_rem_reporting_overflow(b),
                    ((int16(quotient), int16(remainder)), overflow)
                );
            }
            prop_assert_eq!(a.cmp(&b), lhs.cmp(&rhs));
        });
    }

    #[test]
    fn nested_composition_agrees_with_i32() {
        proptest!(|(lhs: i32, rhs: i32, amount in 0..32u32)| {
            let (a, b) = (int32(lhs), int32(rhs));
            prop_assert_eq!(a.wrapping_add(&b), int32(lhs.wrapping_add(rhs)));
            prop_assert_eq!(a.wrapping_sub(&b), int32(lhs.wrapping_sub(rhs)));
            let (product, overflow) = lhs.overflowing_mul(rhs);
            prop_assert_eq!(
                a.mul_reporting_overflow(b),
                (int32(product), overflow)
            );
            prop_assert_eq!(a.checked_div(&b), lhs.checked_div(rhs).map(int32));
            prop_assert_eq!(a.masked_shl(amount), int32(lhs << amount));
            prop_assert_eq!(a.masked_shr(amount), int32(lhs >> amount));
            prop_assert_eq!(a.leading_zero_bit_count(), lhs.leading_zeros());
            prop_assert_eq!(a.trailing_zero_bit_count(), lhs.trailing_zeros());
            prop_assert_eq!(a.nonzero_bit_count(), lhs.count_ones());
            prop_assert_eq!(a.word(0), lhs as i64 as u64);
            prop_assert_eq!(i32::exactly(&a), Some(lhs));
        });
    }

    #[test]
    fn unsigned_nested_composition_agrees_with_u32() {
        proptest!(|(lhs: u32, rhs in 1..=u32::MAX, high: u32)| {
            let (a, b) = (UInt32::truncating(&lhs), UInt32::truncating(&rhs));
            let quotient = UInt32::truncating(&(lhs / rhs));
            let remainder = UInt32::truncating(&(lhs % rhs));
            prop_assert_eq!(a.div_rem(b), (quotient, remainder));
            let high = high % rhs;
            let dividend = (u64::from(high) << 32) | u64::from(lhs);
            let (quotient, remainder) =
                b.dividing_full_width((UInt32::truncating(&high), a));
            prop_assert_eq!(
                u64::exactly(&quotient),
                Some(dividend / u64::from(rhs))
            );
            prop_assert_eq!(
                u64::exactly(&remainder),
                Some(dividend % u64::from(rhs))
            );
        });
    }

    #[test]
    fn arithmetic_agrees_with_u128() {
        proptest!(|(lhs: u128, rhs: u128, amount in 0..128u32)| {
            let (a, b) = (uint128(lhs), uint128(rhs));
            let (sum, overflow) = lhs.overflowing_add(rhs);
            prop_assert_eq!(
                a.add_reporting_overflow(b),
                (uint128(sum), overflow)
            );
            let (difference, overflow) = lhs.overflowing_sub(rhs);
            prop_assert_eq!(
                a.sub_reporting_overflow(b),
                (uint128(difference), overflow)
            );
            let (product, overflow) = lhs.overflowing_mul(rhs);
            prop_assert_eq!(
                a.mul_reporting_overflow(b),
                (uint128(product), overflow)
            );
            if rhs != 0 {
                prop_assert_eq!(a / b, uint128(lhs / rhs));
                prop_assert_eq!(a % b, uint128(lhs % rhs));
            }
            prop_assert_eq!(a << amount, uint128(lhs << amount));
            prop_assert_eq!(a >> amount, uint128(lhs >> amount));
            prop_assert_eq!(a.leading_zero_bit_count(), lhs.leading_zeros());
            prop_assert_eq!(a.trailing_zero_bit_count(), lhs.trailing_zeros());
            prop_assert_eq!(to_words(a), vec![lhs as u64, (lhs >> 64) as u64]);
            prop_assert_eq!(a.cmp(&b), lhs.cmp(&rhs));
        });
    }

    #[test]
    fn division_agrees_with_u128_for_wide_divisors() {
        proptest!(|(lhs: u128, rhs in (1u128 << 64)..=u128::MAX)| {
            let (a, b) = (uint128(lhs), uint128(rhs));
            prop_assert_eq!(
                a.div_rem(b),
                (uint128(lhs / rhs), uint128(lhs % rhs))
            );
        });
    }

    #[test]
    fn arithmetic_agrees_with_i128() {
        proptest!(|(lhs: i128, rhs: i128)| {
            let (a, b) = (int128(lhs), int128(rhs));
            let (sum, overflow) = lhs.overflowing_add(rhs);
            prop_assert_eq!(
                a.add_reporting_overflow(b),
                (int128(sum), overflow)
            );
            let (difference, overflow) = lhs.overflowing_sub(rhs);
            prop_assert_eq!(
                a.sub_reporting_overflow(b),
                (int128(difference), overflow)
            );
            let (product, overflow) = lhs.overflowing_mul(rhs);
            prop_assert_eq!(
                a.mul_reporting_overflow(b),
                (int128(product), overflow)
            );
            if rhs != 0 {
                let (quotient, overflow) = lhs.overflowing_div(rhs);
                let remainder = lhs.wrapping_rem(rhs);
                prop_assert_eq!(
                    a.div_rem_reporting_overflow(b),
                    ((int128(quotient), int128(remainder)), overflow)
                );
            }
            prop_assert_eq!(a.magnitude(), uint128(lhs.unsigned_abs()));
            prop_assert_eq!(a.cmp(&b), lhs.cmp(&rhs));
            let bits = if lhs < 0 { !lhs } else { lhs };
            prop_assert_eq!(a.bit_width(), 128 - bits.leading_zeros());
        });
    }

    #[test]
    fn wide_arithmetic_agrees_with_bigint() {
        let modulus = BigInt::from(1) << 256;
        let wrap = |value: BigInt| {
            let value = ((value % &modulus) + &modulus) % &modulus;
            if value >= (BigInt::from(1) << 255) {
                value - &modulus
            } else {
                value
            }
        };
        proptest!(|(a in int256(), b in int256())| {
            let (big_a, big_b) = (to_bigint(&a), to_bigint(&b));
            prop_assert_eq!(
                to_bigint(&a.wrapping_add(&b)),
                wrap(&big_a + &big_b)
            );
            prop_assert_eq!(
                to_bigint(&a.wrapping_sub(&b)),
                wrap(&big_a - &big_b)
            );
            let (product, overflow) = a.mul_reporting_overflow(b);
            let exact = &big_a * &big_b;
            prop_assert_eq!(to_bigint(&product), wrap(exact.clone()));
            prop_assert_eq!(overflow, wrap(exact.clone()) != exact);
            if b != Int256::ZERO {
                let (quotient, remainder) = a.div_rem(b);
                // `BigInt` division truncates toward zero too.
                prop_assert_eq!(to_bigint(&quotient), &big_a / &big_b);
                prop_assert_eq!(to_bigint(&remainder), &big_a % &big_b);
            }
        });
    }

    #[test]
    fn division_law_for_wide_unsigned() {
        proptest!(|(a in uint256(), b in uint256(), shift in 0..256u32)| {
            let b = b >> shift;
            prop_assume!(b != UInt256::ZERO);
            let (quotient, remainder) = a.div_rem(b);
            prop_assert!(remainder < b);
            prop_assert_eq!(quotient * b + remainder, a);
        });
    }

    #[test]
    fn dividing_full_width_agrees_with_bigint() {
        proptest!(|(
            high in uint256(),
            low in uint256(),
            divisor in uint256(),
            shift in 0..256u32,
        )| {
            let divisor = divisor >> shift;
            prop_assume!(divisor != UInt256::ZERO);
            let high = high % divisor;
            let (quotient, remainder) =
                divisor.dividing_full_width((high, low));
            let dividend = (to_bigint(&high) << 256) + to_bigint(&low);
            prop_assert_eq!(
                to_bigint(&quotient),
                &dividend / to_bigint(&divisor)
            );
            prop_assert_eq!(
                to_bigint(&remainder),
                &dividend % to_bigint(&divisor)
            );
        });
    }

    #[test]
    fn twos_complement_involution_with_min_fixed_point() {
        proptest!(|(value: i128)| {
            let value = int128(value);
            prop_assume!(value != Int128::MIN);
            prop_assert_eq!(value.twos_complement().twos_complement(), value);
            prop_assert_eq!(value.twos_complement() + value, Int128::ZERO);
        });
        let mut min = Int512::MIN;
        min.form_twos_complement();
        assert_eq!(min, Int512::MIN);
        assert_eq!(Int512::MIN.magnitude(), UInt512::ONE << 511);
    }

    #[test]
    fn smart_shifts_saturate() {
        assert_eq!(UInt256::MAX << 256, UInt256::ZERO);
        assert_eq!(UInt256::MAX >> 300, UInt256::ZERO);
        assert_eq!(Int256::MIN >> 256, !Int256::ZERO);
        assert_eq!(Int256::MIN >> 255, !Int256::ZERO);
        assert_eq!(Int256::ONE << 255, Int256::MIN);
        assert_eq!(UInt256::ONE.masked_shl(256), UInt256::ONE);
    }

    #[test]
    fn bit_counts_cross_the_halves() {
        assert_eq!(UInt256::ZERO.leading_zero_bit_count(), 256);
        assert_eq!(UInt256::ZERO.trailing_zero_bit_count(), 256);
        assert_eq!(UInt256::MAX.nonzero_bit_count(), 256);
        assert_eq!((UInt256::ONE << 130).trailing_zero_bit_count(), 130);
        assert_eq!((UInt256::ONE << 130).leading_zero_bit_count(), 125);
        assert_eq!(Int256::MIN.leading_zero_bit_count(), 0);
        assert_eq!((!Int256::ZERO).nonzero_bit_count(), 256);
    }

    #[test]
    fn words_view_is_little_endian() {
        let value = UInt256::truncating_from_words(&[1, 2, 3, 4]);
        assert_eq!(to_words(value), vec![1, 2, 3, 4]);
        assert_eq!(value.high(), UInt128::new(4, 3));
        assert_eq!(value.word(7), 0);
        let negative = Int256::from(Int128::from(-2i64));
        assert_eq!(to_words(negative), vec![!1, u64::MAX, u64::MAX, u64::MAX]);
        assert_eq!(negative.word(9), u64::MAX);
    }

    #[test]
    fn conversions_between_widths() {
        let value = Int256::from(Int128::from(-7i64));
        assert_eq!(i8::exactly(&value), Some(-7));
        assert_eq!(u64::exactly(&value), None);
        assert_eq!(UInt128::exactly(&value), None);
        assert_eq!(UInt128::clamping(&value), UInt128::ZERO);
        assert_eq!(Int128::exactly(&UInt256::MAX), None);
        assert_eq!(Int128::clamping(&UInt256::MAX), Int128::MAX);
        assert_eq!(UInt128::truncating(&-1i64), UInt128::MAX);
        assert_eq!(
            Int1024::exactly(&u128::MAX),
            Some(Int1024::truncating(&u128::MAX))
        );
        assert_eq!(UInt16::exactly(&300u32), Some(uint16(300)));
        assert_eq!(Int16::exactly(&40_000u32), None);
        assert_eq!(Int16::exactly(&-129i64), Some(int16(-129)));
        assert_eq!(UInt128::exactly(&u128::MAX), Some(uint128(u128::MAX)));
        assert_eq!(Int128::from_bit_pattern(UInt128::MAX), -Int128::ONE);
        assert_eq!((-Int128::ONE).bit_pattern(), UInt128::MAX);
    }

    #[test]
    fn formatting() {
        assert_eq!(format!("{}", int128(-1234)), "-1234");
        assert_eq!(format!("{:>6}", uint128(42)), "    42");
        assert_eq!(
            format!("{:x}", int128(-1)),
            "ffffffffffffffffffffffffffffffff"
        );
        assert_eq!(format!("{:#X}", uint128(0xBEEF)), "0xBEEF");
        assert_eq!(format!("{:#b}", uint16(5)), "0b101");
        assert_eq!(format!("{:o}", uint128(8)), "10");
        assert_eq!("-0x10".parse::<Int128>(), Ok(int128(-16)));
    }

    #[test]
    fn bit_iterator_is_big_endian() {
        let bits: Vec<bool> = uint16(0b1100).bit_be_trimmed_iter().collect();
        assert_eq!(bits, vec![true, true, false, false]);
        assert_eq!(UInt256::MAX.bit_be_iter().count(), 256);
    }

    #[test]
    fn hash_follows_equality() {
        use std::collections::HashSet;

        let values: HashSet<Int256> = [
            Int256::from(int128(-1)),
            -Int256::ONE,
            Int256::exactly(&u128::MAX).unwrap(),
            Int256::MAX,
        ]
        .into_iter()
        .collect();
        assert_eq!(values.len(), 3);
        assert!(values.contains(&Int256::from(int128(-1))));
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn division_by_zero_traps() {
        _ = UInt256::ONE / UInt256::ZERO;
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn signed_remainder_by_zero_traps() {
        _ = Int128::ONE % Int128::ZERO;
    }

    #[test]
    #[should_panic(expected = "attempt to add with overflow")]
    fn addition_overflow_traps() {
        _ = Int256::MAX + Int256::ONE;
    }

    #[test]
    #[should_panic(expected = "attempt to divide with overflow")]
    fn min_divided_by_minus_one_traps() {
        _ = Int128::MIN / -Int128::ONE;
    }

    #[test]
    #[should_panic(expected = "attempt to negate with overflow")]
    fn negating_min_traps() {
        _ = -Int256::MIN;
    }
}
