use hll32::{Counter, CounterError};
use wyhash::wyhash;

fn hash(item: &str) -> u32 {
    wyhash(item.as_bytes(), 0) as u32
}

fn main() -> Result<(), CounterError> {
    let mut counter1 = Counter::new(10)?;
    for i in 0..1000 {
        counter1.add(hash(&format!("visitor-{}", i)));
    }
    println!("counter1 estimate = {}", counter1.estimate());

    let mut counter2 = Counter::new(10)?;
    for i in 500..1500 {
        counter2.add(hash(&format!("visitor-{}", i)));
    }
    println!("counter2 estimate = {}", counter2.estimate());

    counter1.merge(&counter2)?;
    println!(
        "merged estimate = {} (standard error {:.2}%)",
        counter1.estimate(),
        counter1.standard_error() * 100.0
    );

    if let Err(e) = counter1.merge(&Counter::new(12)?) {
        println!("merge rejected: {}", e);
    }
    Ok(())
}
