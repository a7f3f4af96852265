use num_bigint::BigInt;

use crate::arithmetic::{BinaryInteger, Limb};

/// Reads the two's complement words of `value` as a [`BigInt`].
pub(crate) fn to_bigint<T: BinaryInteger + ?Sized>(value: &T) -> BigInt {
    // One extra word of sign extension keeps the top bit meaningful.
    let bytes: Vec<u8> = value
        .low_words(value.word_count() + 1)
        .into_iter()
        .flat_map(Limb::to_le_bytes)
        .collect();
    BigInt::from_signed_bytes_le(&bytes)
}
