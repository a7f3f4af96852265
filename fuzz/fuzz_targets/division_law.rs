#![no_main]
use libfuzzer_sys::fuzz_target;
use openzeppelin_wideint::{
    FixedWidthInteger, IntXL, Limb, Sign, UInt256, UIntXL,
};

fuzz_target!(|data: (Vec<Limb>, Vec<Limb>, bool, bool)| {
    let (dividend, divisor, dividend_negative, divisor_negative) = data;
    let dividend = UIntXL::new(dividend);
    let divisor = UIntXL::new(divisor);
    if divisor.is_zero() {
        return;
    }

    let (quotient, remainder) = dividend.div_rem(&divisor);
    assert!(remainder < divisor);
    assert_eq!(&quotient * &divisor + &remainder, dividend);

    let sign = |negative| if negative { Sign::Minus } else { Sign::Plus };
    let lhs = IntXL::new(sign(dividend_negative), dividend.clone());
    let rhs = IntXL::new(sign(divisor_negative), divisor.clone());
    let (quotient, remainder) = lhs.div_rem(&rhs);
    assert_eq!(&quotient * &rhs + &remainder, lhs);

    if let (Some(lhs), Some(rhs)) =
        (UInt256::exactly(&dividend), UInt256::exactly(&divisor))
    {
        let (quotient, remainder) = lhs.div_rem(rhs);
        assert!(remainder < rhs);
        assert_eq!(quotient * rhs + remainder, lhs);
    }
});
