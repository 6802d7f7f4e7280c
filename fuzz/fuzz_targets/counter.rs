#![no_main]

use hll32::{Counter, CounterError};
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    let Some((&first, data)) = data.split_first() else {
        return;
    };
    let precision = Counter::MIN_PRECISION + (first as usize) % 13;

    let split_index = if data.is_empty() {
        0
    } else {
        wyhash(data, 0) as usize % data.len()
    };
    let (first_half, second_half) = data.split_at(split_index);

    let mut counter1 = Counter::new(precision).unwrap();
    for chunk in first_half.chunks_exact(4) {
        let hash = u32::from_le_bytes(chunk.try_into().unwrap());
        let idx = (hash >> (32 - precision)) as usize;
        let before = counter1.registers()[idx];
        counter1.add(hash);
        let after = counter1.registers()[idx];
        assert!(after >= before && after >= 1);
        assert!(after as usize <= 33 - precision);
    }

    let mut counter2 = Counter::new(precision).unwrap();
    counter2.extend(
        second_half
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes(chunk.try_into().unwrap())),
    );

    let lhs = counter1.clone();
    counter1.merge(&counter2).unwrap();
    for (i, &rank) in counter1.registers().iter().enumerate() {
        assert_eq!(rank, lhs.registers()[i].max(counter2.registers()[i]));
    }
    counter1.estimate();

    if precision < Counter::MAX_PRECISION {
        let other = Counter::new(precision + 1).unwrap();
        let merged = counter1.clone();
        assert_eq!(
            counter1.merge(&other),
            Err(CounterError::PrecisionMismatch {
                lhs: precision,
                rhs: precision + 1,
            })
        );
        assert_eq!(counter1, merged);
    }
});
