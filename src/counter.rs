//! HyperLogLog counter allows to estimate number of distinct elements
//! in the stream or dataset from their 32-bit hashes and is defined by
//! the `precision` parameter in [4..16] range, which defines number of
//! hash bits used for register indices.
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! # Data-structure design
//!
//! - `M = 2^precision` registers, one byte each, all starting at zero.
//! - Top `precision` bits of a hash select the register, the remaining
//!   `32 - precision` bits give the rank (1-based position of the leftmost set bit).
//! - Each register keeps the maximum rank observed, so inserts and merges
//!   are monotonic and merges are lossless.
//!
//! Maximum rank is `33 - precision`, which always fits into a `u8` register.
//!
//! # Estimation
//!
//! Raw estimate `E = alpha * M^2 / sum(2^-register)` is corrected depending on its range:
//! - `E <= 2.5 * M`: linear counting `M * ln(M / zeros)` while there are zero registers.
//! - `E < 2^32 / 30`: raw estimate is used as is.
//! - otherwise: hash collisions correction `-2^32 * ln(1 - E / 2^32)`.
//!
//! Conversions into `u32` truncate toward zero. Once the raw estimate reaches `2^32` the
//! collision correction is undefined and the estimate saturates at `u32::MAX`.
//!
//! Expected error is `1.04 / sqrt(M)`:
//!   precision = 4: 26%
//!   precision = 10: 3.25%
//!   precision = 12: 1.62%
//!   precision = 16: 0.41%
//!
//! A counter has no internal synchronization. Concurrent writers must wrap it
//! into a lock or keep one counter per writer and `merge` them.

use std::fmt::{Debug, Formatter};
use std::mem::size_of;

use tracing::debug;

#[cfg(not(feature = "portable_clz"))]
use crate::clz::count_leading_zeros32 as clz32;
#[cfg(feature = "portable_clz")]
use crate::clz::count_leading_zeros32_branchless as clz32;
use crate::error::CounterError;

/// Size of 32-bit hash space
const TWO_POW_32: f64 = 4_294_967_296.0;

/// HyperLogLog counter over 32-bit hashes
#[derive(Clone)]
pub struct Counter {
    /// Number of hash bits used to select a register
    precision: usize,
    /// Bias correction constant for `2^precision` registers
    alpha: f64,
    /// Mask isolating hash bits after the register index
    mask: u32,
    /// Maximum observed rank per register
    registers: Vec<u8>,
}

impl Counter {
    pub const MIN_PRECISION: usize = 4;
    pub const MAX_PRECISION: usize = 16;
    pub const DEFAULT_PRECISION: usize = 12;

    /// Creates new instance of `Counter` with `2^precision` registers
    pub fn new(precision: usize) -> Result<Self, CounterError> {
        if !(Self::MIN_PRECISION..=Self::MAX_PRECISION).contains(&precision) {
            debug!(precision, "rejecting counter precision outside of [4, 16] range");
            return Err(CounterError::InvalidPrecision(precision));
        }
        Ok(Self::with_valid_precision(precision))
    }

    /// Creates new instance of `Counter` with the smallest precision
    /// whose standard error does not exceed `epsilon`
    pub fn with_error(epsilon: f64) -> Result<Self, CounterError> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            debug!(epsilon, "rejecting counter error rate outside of (0, 1) range");
            return Err(CounterError::InvalidErrorRate(epsilon));
        }
        let m = (1.04 / epsilon).powi(2);
        let precision = (m.log2().ceil() as usize).max(Self::MIN_PRECISION);
        Self::new(precision)
    }

    #[inline]
    fn with_valid_precision(precision: usize) -> Self {
        let m = 1 << precision;
        Self {
            precision,
            alpha: alpha(m),
            mask: u32::MAX >> precision,
            registers: vec![0; m],
        }
    }

    /// Return number of hash bits used to select a register
    #[inline]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Return number of registers
    #[inline]
    pub fn register_count(&self) -> usize {
        self.registers.len()
    }

    /// Return registers' ranks
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Return expected relative standard error of estimates
    pub fn standard_error(&self) -> f64 {
        1.04 / (self.registers.len() as f64).sqrt()
    }

    /// Return whether nothing was added or merged into the counter yet
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|&r| r == 0)
    }

    /// Add 32-bit hash of an item into the counter
    #[inline]
    pub fn add(&mut self, hash: u32) {
        let idx = (hash >> (32 - self.precision)) as usize;
        // Masked hash has at least `precision` leading zeros, so rank is in [1, 33 - precision].
        let rank = (clz32(hash & self.mask) + 1 - self.precision as u32) as u8;
        // SAFETY: `idx` has at most `precision` bits, so it is below `registers.len()`.
        let register = unsafe { self.registers.get_unchecked_mut(idx) };
        if rank > *register {
            *register = rank;
        }
    }

    /// Return cardinality estimate
    pub fn estimate(&self) -> u32 {
        let m = self.registers.len() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&r| (-f64::from(r)).exp2())
            .sum();
        let estimate = self.alpha * m * m / sum;

        if estimate <= 2.5 * m {
            let zeros = self.registers.iter().filter(|&&r| r == 0).count();
            if zeros == 0 {
                estimate as u32
            } else {
                (m * (m / zeros as f64).ln()) as u32
            }
        } else if estimate < TWO_POW_32 / 30.0 {
            estimate as u32
        } else if estimate < TWO_POW_32 {
            (-TWO_POW_32 * (1.0 - estimate / TWO_POW_32).ln()) as u32
        } else {
            u32::MAX
        }
    }

    /// Merge `rhs` counter into this one, producing the counter of both streams' union
    pub fn merge(&mut self, rhs: &Counter) -> Result<(), CounterError> {
        if self.precision != rhs.precision {
            debug!(
                lhs = self.precision,
                rhs = rhs.precision,
                "rejecting merge of counters with different precisions"
            );
            return Err(CounterError::PrecisionMismatch {
                lhs: self.precision,
                rhs: rhs.precision,
            });
        }
        self.registers
            .iter_mut()
            .zip(rhs.registers.iter())
            .for_each(|(lhs, &rhs)| *lhs = (*lhs).max(rhs));
        Ok(())
    }

    /// Reset all registers to zero
    pub fn clear(&mut self) {
        self.registers.fill(0);
    }

    /// Return memory size of `Counter`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.registers.capacity()
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::with_valid_precision(Self::DEFAULT_PRECISION)
    }
}

impl Extend<u32> for Counter {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, hashes: I) {
        for hash in hashes {
            self.add(hash);
        }
    }
}

impl PartialEq for Counter {
    /// Compare counters by precision and registers
    fn eq(&self, rhs: &Self) -> bool {
        self.precision == rhs.precision && self.registers == rhs.registers
    }
}

impl Eq for Counter {}

impl Debug for Counter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, estimate: {}, size: {} }}",
            self.precision,
            self.estimate(),
            self.size_of()
        )
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
