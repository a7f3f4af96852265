//! Radix-aware conversion between integers and ASCII text.
//!
//! Digits are processed in chunks of as many digits as fit one [`Limb`]
//! (see [`RadixSolution`]), so decoding costs one multiply-add per chunk and
//! encoding one division per chunk. Power-of-two radixes skip arithmetic
//! altogether and move bits around.

use alloc::{string::String, vec, vec::Vec};
use core::fmt;

use crate::{
    arithmetic::{limbs, BinaryInteger, FixedWidthInteger, Limb},
    error::{IntegerErrorKind, ParseIntegerError},
    signed::Sign,
};

/// Chunking parameters of a radix.
///
/// `power = radix^exponent` is the largest power of the radix that does not
/// exceed `2^64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadixSolution {
    radix: u32,
    exponent: u32,
    /// `0` stands for `2^64`.
    power: Limb,
    /// Bits per digit of power-of-two radixes, `0` otherwise.
    bits: u32,
}

impl RadixSolution {
    /// Computes the chunking parameters of `radix`.
    ///
    /// # Panics
    ///
    /// * If `radix` is not in `2..=36`.
    #[must_use]
    pub const fn new(radix: u32) -> Self {
        assert!(radix >= 2 && radix <= 36, "radix must be in 2...36");

        if radix.is_power_of_two() {
            let bits = radix.trailing_zeros();
            let exponent = Limb::BITS / bits;
            let chunk_bits = exponent * bits;
            let power =
                if chunk_bits == Limb::BITS { 0 } else { 1 << chunk_bits };
            return Self { radix, exponent, power, bits };
        }

        let mut exponent = 1;
        let mut power = radix as Limb;
        while let Some(next) = power.checked_mul(radix as Limb) {
            power = next;
            exponent += 1;
        }
        Self { radix, exponent, power, bits: 0 }
    }

    /// Returns the radix.
    #[must_use]
    pub const fn radix(&self) -> u32 {
        self.radix
    }

    /// Returns the number of digits of a chunk.
    #[must_use]
    pub const fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Returns `radix^exponent`, or [`None`] when it is exactly `2^64`.
    #[must_use]
    pub const fn power(&self) -> Option<Limb> {
        if self.power == 0 {
            None
        } else {
            Some(self.power)
        }
    }

    /// Returns the number of bits per digit of a power-of-two radix.
    #[must_use]
    pub const fn bits_per_digit(&self) -> Option<u32> {
        if self.bits == 0 {
            None
        } else {
            Some(self.bits)
        }
    }
}

/// Maps ASCII digits to their values in a radix.
#[derive(Clone, Copy, Debug)]
struct AlphabetDecoder {
    radix: u8,
}

impl AlphabetDecoder {
    #[allow(clippy::cast_possible_truncation)]
    const fn new(radix: u32) -> Self {
        Self { radix: radix as u8 }
    }

    /// Returns the value of `byte`, letters being case insensitive.
    const fn decode(self, byte: u8) -> Option<Limb> {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'z' => byte - b'a' + 10,
            b'A'..=b'Z' => byte - b'A' + 10,
            _ => return None,
        };
        if digit < self.radix {
            Some(digit as Limb)
        } else {
            None
        }
    }
}

/// Maps digit values to ASCII digits.
#[derive(Clone, Copy, Debug)]
struct AlphabetEncoder {
    letters: u8,
}

impl AlphabetEncoder {
    const fn new(uppercase: bool) -> Self {
        Self { letters: if uppercase { b'A' } else { b'a' } }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn encode(self, digit: Limb) -> u8 {
        let digit = digit as u8;
        if digit < 10 {
            b'0' + digit
        } else {
            self.letters + digit - 10
        }
    }
}

// ----------- Decode -----------

/// Decodes `text` into its sign and trimmed magnitude.
///
/// Without an explicit `radix`, a `0b`, `0o` or `0x` prefix after the sign
/// selects radix 2, 8 or 16, and anything else is decimal.
///
/// # Errors
///
/// * If there are no digits.
/// * If a digit is outside the alphabet of the radix.
///
/// # Panics
///
/// * If `radix` is not in `2..=36`.
pub fn decode_sign_and_magnitude(
    text: &str,
    radix: Option<u32>,
) -> Result<(Sign, Vec<Limb>), ParseIntegerError> {
    let (sign, body) = match text.as_bytes() {
        [b'-', body @ ..] => (Sign::Minus, body),
        [b'+', body @ ..] => (Sign::Plus, body),
        body => (Sign::Plus, body),
    };
    let (radix, body) = match radix {
        Some(radix) => (radix, body),
        None => match body {
            [b'0', b'b', body @ ..] => (2, body),
            [b'0', b'o', body @ ..] => (8, body),
            [b'0', b'x', body @ ..] => (16, body),
            body => (10, body),
        },
    };

    let solution = RadixSolution::new(radix);
    if body.is_empty() {
        return Err(ParseIntegerError::new(IntegerErrorKind::Empty));
    }

    let decoder = AlphabetDecoder::new(radix);
    let magnitude = match solution.bits_per_digit() {
        Some(bits) => decode_power_of_two(body, decoder, bits),
        None => decode_chunked(body, decoder, &solution),
    };
    magnitude
        .map(|magnitude| (sign, magnitude))
        .ok_or(ParseIntegerError::new(IntegerErrorKind::InvalidDigit))
}

/// Horner's method on a chunk short enough to fit a [`Limb`].
fn decode_chunk(digits: &[u8], decoder: AlphabetDecoder) -> Option<Limb> {
    let radix = Limb::from(decoder.radix);
    digits.iter().try_fold(0, |value: Limb, &byte| {
        Some(value * radix + decoder.decode(byte)?)
    })
}

/// Horner's method by chunks: `value = value * power + chunk`.
fn decode_chunked(
    body: &[u8],
    decoder: AlphabetDecoder,
    solution: &RadixSolution,
) -> Option<Vec<Limb>> {
    let exponent = solution.exponent as usize;
    let head = match body.len() % exponent {
        0 => exponent.min(body.len()),
        len => len,
    };
    let (head, tail) = body.split_at(head);

    let mut magnitude = vec![decode_chunk(head, decoder)?];
    for chunk in tail.chunks(exponent) {
        let value = decode_chunk(chunk, decoder)?;
        limbs::multiply_by_limb_and_add(&mut magnitude, solution.power, value);
    }
    limbs::trim(&mut magnitude);
    Some(magnitude)
}

/// Places the bits of every digit directly, from the least significant one.
fn decode_power_of_two(
    body: &[u8],
    decoder: AlphabetDecoder,
    bits: u32,
) -> Option<Vec<Limb>> {
    let mut magnitude =
        vec![0; (body.len() * bits as usize).div_ceil(Limb::BITS as usize)];
    for (position, &byte) in body.iter().rev().enumerate() {
        let digit = decoder.decode(byte)?;
        let offset = position * bits as usize;
        let (index, shift) = split_bit_offset(offset);
        magnitude[index] |= digit << shift;
        if shift + bits > Limb::BITS {
            magnitude[index + 1] |= digit >> (Limb::BITS - shift);
        }
    }
    limbs::trim(&mut magnitude);
    Some(magnitude)
}

#[allow(clippy::cast_possible_truncation)]
const fn split_bit_offset(offset: usize) -> (usize, u32) {
    let bits = Limb::BITS as usize;
    (offset / bits, (offset % bits) as u32)
}

// ----------- Encode -----------

/// Encodes a sign and a magnitude in `radix`.
///
/// The most significant chunk is written without leading zeros and the
/// others are zero-padded to the chunk width. A minus sign is written only for
/// a nonzero magnitude.
///
/// # Panics
///
/// * If `radix` is not in `2..=36`.
#[must_use]
pub fn encode_sign_and_magnitude(
    sign: Sign,
    magnitude: &[Limb],
    radix: u32,
    uppercase: bool,
) -> String {
    let solution = RadixSolution::new(radix);
    let magnitude = limbs::trimmed(magnitude);
    let chunks = match (solution.bits_per_digit(), solution.power()) {
        (_, None) => magnitude.to_vec(),
        (Some(bits), Some(_)) => {
            chunks_by_extraction(magnitude, bits * solution.exponent)
        }
        (None, Some(power)) => chunks_by_division(magnitude, power),
    };

    let encoder = AlphabetEncoder::new(uppercase);
    let width = solution.exponent as usize;
    let mut text = String::with_capacity(chunks.len() * width + 1);
    if sign == Sign::Minus && !magnitude.is_empty() {
        text.push('-');
    }
    match chunks.split_last() {
        None => text.push('0'),
        Some((&top, rest)) => {
            push_chunk(&mut text, top, None, radix, encoder);
            for &chunk in rest.iter().rev() {
                push_chunk(&mut text, chunk, Some(width), radix, encoder);
            }
        }
    }
    text
}

/// Chunks from the least significant one, by repeated division by `power`.
fn chunks_by_division(magnitude: &[Limb], power: Limb) -> Vec<Limb> {
    let mut quotient = magnitude.to_vec();
    let mut chunks = Vec::new();
    while !quotient.is_empty() {
        chunks.push(limbs::divide_by_limb(&mut quotient, power));
        limbs::trim(&mut quotient);
    }
    chunks
}

/// Chunks from the least significant one, `chunk_bits` bits each.
fn chunks_by_extraction(magnitude: &[Limb], chunk_bits: u32) -> Vec<Limb> {
    let width = limbs::bit_width(magnitude);
    let mask = (1 << chunk_bits) - 1;
    (0..width.div_ceil(chunk_bits as usize))
        .map(|chunk| {
            let (index, shift) = split_bit_offset(chunk * chunk_bits as usize);
            let low = magnitude[index] >> shift;
            let high = match magnitude.get(index + 1) {
                Some(&next) if shift != 0 => next << (Limb::BITS - shift),
                _ => 0,
            };
            (low | high) & mask
        })
        .collect()
}

/// Writes the digits of `chunk`, left-padded with zeros to `width` if given.
fn push_chunk(
    text: &mut String,
    chunk: Limb,
    width: Option<usize>,
    radix: u32,
    encoder: AlphabetEncoder,
) {
    let radix = Limb::from(radix);
    let mut digits = [b'0'; Limb::BITS as usize];
    let mut start = digits.len();
    let mut chunk = chunk;
    loop {
        start -= 1;
        digits[start] = encoder.encode(chunk % radix);
        chunk /= radix;
        if chunk == 0 {
            break;
        }
    }
    if let Some(width) = width {
        start = start.min(digits.len() - width);
    }
    text.extend(digits[start..].iter().map(|&digit| char::from(digit)));
}

/// Formats `value` in `radix` honoring the width, fill and sign flags of `f`.
pub(crate) fn fmt_radix<T: TextCodec + ?Sized>(
    value: &T,
    f: &mut fmt::Formatter<'_>,
    radix: u32,
    prefix: &str,
    uppercase: bool,
) -> fmt::Result {
    let (sign, magnitude) = value.to_sign_and_magnitude();
    let digits =
        encode_sign_and_magnitude(Sign::Plus, &magnitude, radix, uppercase);
    let is_nonnegative =
        sign == Sign::Plus || limbs::trimmed(&magnitude).is_empty();
    f.pad_integral(is_nonnegative, prefix, &digits)
}

// ----------- Codec -----------

/// Text conversions shared by every integer kind.
pub trait TextCodec: Sized {
    /// Builds a value from its sign and little-endian magnitude, if
    /// representable.
    #[doc(hidden)]
    fn from_sign_and_magnitude(sign: Sign, magnitude: &[Limb]) -> Option<Self>;

    /// Returns the sign and the little-endian magnitude of `self`.
    #[doc(hidden)]
    fn to_sign_and_magnitude(&self) -> (Sign, Vec<Limb>);

    /// Parses `text` in `radix`, or by its literal prefix when `radix` is
    /// [`None`].
    ///
    /// # Errors
    ///
    /// * If there are no digits.
    /// * If a digit is outside the alphabet of the radix.
    /// * If the value is not representable by `Self`.
    ///
    /// # Panics
    ///
    /// * If `radix` is not in `2..=36`.
    fn parse(
        text: &str,
        radix: Option<u32>,
    ) -> Result<Self, ParseIntegerError> {
        let (sign, magnitude) = decode_sign_and_magnitude(text, radix)?;
        Self::from_sign_and_magnitude(sign, &magnitude)
            .ok_or(ParseIntegerError::new(IntegerErrorKind::OutOfRange))
    }

    /// Decodes `text`, see [`TextCodec::parse`].
    ///
    /// # Panics
    ///
    /// * If `radix` is not in `2..=36`.
    fn decode(text: &str, radix: Option<u32>) -> Option<Self> {
        Self::parse(text, radix).ok()
    }

    /// Encodes `self` in `radix` with lowercase or `uppercase` letters.
    ///
    /// # Panics
    ///
    /// * If `radix` is not in `2..=36`.
    fn encode(&self, radix: u32, uppercase: bool) -> String {
        let (sign, magnitude) = self.to_sign_and_magnitude();
        encode_sign_and_magnitude(sign, &magnitude, radix, uppercase)
    }

    /// Parses an integer literal: an optional sign, an optional `0b`, `0o` or
    /// `0x` prefix, and digits.
    ///
    /// # Panics
    ///
    /// * If `text` is not a valid literal or its value is not representable.
    #[track_caller]
    fn from_literal(text: &str) -> Self {
        match Self::parse(text, None) {
            Ok(value) => value,
            Err(error) => panic!("invalid integer literal {text:?}: {error}"),
        }
    }
}

impl<T: FixedWidthInteger> TextCodec for T {
    fn from_sign_and_magnitude(sign: Sign, magnitude: &[Limb]) -> Option<Self> {
        let magnitude =
            <T::Magnitude as FixedWidthInteger>::exactly(magnitude)?;
        match sign {
            Sign::Plus => {
                let value = T::from_bit_pattern(magnitude);
                (!value.is_negative()).then_some(value)
            }
            Sign::Minus => {
                let value = T::from_bit_pattern(magnitude.twos_complement());
                (value.is_negative() || value == T::ZERO).then_some(value)
            }
        }
    }

    fn to_sign_and_magnitude(&self) -> (Sign, Vec<Limb>) {
        let sign = if self.is_negative() { Sign::Minus } else { Sign::Plus };
        let mut magnitude: Vec<Limb> = self.magnitude().words().collect();
        limbs::trim(&mut magnitude);
        (sign, magnitude)
    }
}

/// Parses an integer literal at the call site, panicking when it is malformed
/// or out of range.
///
/// ```
/// use openzeppelin_wideint::{from_literal, Int256, UInt128};
///
/// let value: UInt128 = from_literal!("0xFFFF0000");
/// # let _ = value;
/// let negative = from_literal!(Int256, "-12345678901234567890123456789");
/// assert_eq!(negative.to_string(), "-12345678901234567890123456789");
/// ```
#[macro_export]
macro_rules! from_literal {
    ($literal:literal) => {
        <_ as $crate::text::TextCodec>::from_literal($literal)
    };
    ($int:ty, $literal:literal) => {
        <$int as $crate::text::TextCodec>::from_literal($literal)
    };
}
