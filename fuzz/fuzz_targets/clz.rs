#![no_main]

use hll32::clz::{count_leading_zeros32, count_leading_zeros32_branchless};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|x: u32| {
    let n = count_leading_zeros32(x);
    assert_eq!(n, count_leading_zeros32_branchless(x));
    assert!(n <= 32);
    if x != 0 {
        assert_eq!(x >> (31 - n), 1);
    }
});
