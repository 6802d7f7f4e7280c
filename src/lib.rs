//! `hll32` is a Rust crate designed to estimate the number of distinct elements in a stream or dataset
//! from caller-supplied 32-bit hashes.
//!
//! This library implements the original HyperLogLog algorithm (Flajolet et al., 2007) with
//! one byte per register and lossless register-wise merges of independently maintained counters.
//!
//! ```
//! use hll32::Counter;
//!
//! let mut counter = Counter::new(10)?;
//! for i in 0..1000u32 {
//!     counter.add(i.wrapping_mul(0x9e37_79b9));
//! }
//! let mut other = Counter::new(10)?;
//! other.add(42);
//! counter.merge(&other)?;
//! println!("estimate = {}", counter.estimate());
//! # Ok::<(), hll32::CounterError>(())
//! ```
pub mod clz;
pub mod counter;
mod error;

pub use counter::Counter;
pub use error::CounterError;
