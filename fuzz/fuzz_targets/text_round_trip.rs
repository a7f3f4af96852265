#![no_main]
use libfuzzer_sys::fuzz_target;
use openzeppelin_wideint::{FixedWidthInteger, Int256, IntXL, TextCodec, UIntXL};

fuzz_target!(|data: (&str, u8)| {
    let (text, radix) = data;
    let radix = 2 + u32::from(radix) % 35;

    // Decoding arbitrary text must never panic for a valid radix.
    if let Some(value) = IntXL::decode(text, Some(radix)) {
        let encoded = value.encode(radix, false);
        assert_eq!(IntXL::decode(&encoded, Some(radix)), Some(value.clone()));

        let narrow = Int256::decode(text, Some(radix));
        assert_eq!(
            narrow.map(IntXL::from),
            Int256::exactly(&value).map(IntXL::from)
        );
    }
    if let Some(value) = UIntXL::decode(text, None) {
        assert_eq!(value.to_string().parse::<UIntXL>(), Ok(value));
    }
});
