/*!
Multi-precision integers for constrained environments.

> Note that `wideint` is still `0.*.*`, so breaking changes
> [may occur at any time](https://semver.org/#spec-item-4). If you must depend
> on `wideint`, we recommend pinning to a specific version, i.e., `=0.y.z`.

## Integer Kinds

- [`DoubleWidth`] composes two halves of a narrower fixed-width integer into
  one of twice the width, recursively: [`UInt256`] is
  `DoubleWidth<DoubleWidth<u64>>`. Signed compositions use a signed high half.
- [`UIntXL`] is an unsigned integer of unbounded width, backed by a trimmed
  sequence of 64-bit limbs.
- [`Signed`] pairs a [`Sign`] with any unsigned [`Magnitude`], and [`IntXL`]
  is its flexible-width instance.

Every kind shares the [`BinaryInteger`] words view, which is how they convert
between each other, and the [`TextCodec`] text conversions.

```
use openzeppelin_wideint::{FixedWidthInteger, IntXL, TextCodec, UInt256};

let max = "0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF";
let value = UInt256::decode(max, None).unwrap();
let (square, overflow) = value.mul_reporting_overflow(value);
assert!(!overflow);

let signed = -IntXL::from(square);
assert_eq!(
    signed.encode(16, false),
    "-fffffffffffffffffffffffffffffffe00000000000000000000000000000001"
);
```

## Errors

Overflowing operators, division by zero and out-of-range conversions panic,
as native integers do. Operations suffixed with `reporting_overflow` return an
overflow flag instead, and text decoding reports malformed input through
[`ParseIntegerError`].
*/

#![cfg_attr(not(any(test, feature = "std")), no_std)]
extern crate alloc;

pub mod arithmetic;
pub use arithmetic::{
    BinaryInteger, FixedWidthInteger, Limb, UnsignedInteger, Words,
};
pub mod bits;
pub mod double_width;
pub use double_width::{
    DoubleWidth, Int1024, Int128, Int256, Int512, UInt1024, UInt128, UInt256,
    UInt512,
};
pub mod error;
pub use error::{IntegerErrorKind, ParseIntegerError};
pub mod flexible;
pub use flexible::UIntXL;
pub mod signed;
pub use signed::{IntXL, Magnitude, Sign, Signed};
#[macro_use]
pub mod text;
pub use text::{RadixSolution, TextCodec};

#[cfg(test)]
mod test_helpers;
