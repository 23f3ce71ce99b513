//! Oscillator Lookup Tables — integer quadrature reference tables
//!
//! Builds the fixed-point sine/cosine tables that stand in for a local
//! oscillator in the embedded mixer. Two strategies are provided:
//!
//! - **Chunk-aligned** ([`QuadratureLut`]): a sin/cos pair sized to the
//!   mixer's accumulation chunk, holding a whole number of carrier periods
//!   bracketed by zero runs so a chunk read with wraparound never leaves
//!   the non-zero region.
//! - **Best-fit** ([`BestFitLut`]): the prefix of a one-cycle sine table
//!   truncated at the candidate index closest to a true zero crossing,
//!   minimizing the phase step when the table is reused cyclically.
//!
//! All table values are scaled by 128 and rounded half away from zero.
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::lut::QuadratureLut;
//!
//! let lut = QuadratureLut::chunk_aligned(2_250_000.0, 225_000.0, 64).unwrap();
//! assert_eq!(lut.table_len(), 128);        // 2 × chunk_size
//! assert_eq!(lut.leading_zeros(), 10);     // floor(samples_per_cycle)
//! assert_eq!(lut.lut_len(), 50);           // 5 whole periods of 10 samples
//! ```

use crate::types::{DspError, DspResult};
use std::f64::consts::PI;
use tracing::debug;

/// Fixed-point scale of all oscillator table values.
pub const LUT_SCALE: f64 = 128.0;

/// Chunk-aligned quadrature (sin/cos) reference table pair.
///
/// Tables are `2 × chunk_size` long: a leading zero run of
/// `floor(samples_per_cycle)` entries, then `lut_len` oscillator samples
/// covering a whole number of carrier periods, then trailing zeros. The
/// layout guarantees that a chunk-sized read starting anywhere below
/// `chunk_size` stays within the table.
#[derive(Debug, Clone)]
pub struct QuadratureLut {
    sin: Vec<i32>,
    cos: Vec<i32>,
    samples_per_cycle: f64,
    periods: usize,
    lut_len: usize,
    chunk_size: usize,
}

impl QuadratureLut {
    /// Build the sin/cos pair for `rf_freq` at `sample_rate`, aligned to
    /// `chunk_size`-sample accumulation chunks.
    ///
    /// Fails if the chunk cannot hold at least one whole carrier period
    /// (`chunk_size ≤ samples_per_cycle`, or no whole period fits after the
    /// leading zero run), which would degenerate into an all-zero table.
    pub fn chunk_aligned(sample_rate: f64, rf_freq: f64, chunk_size: usize) -> DspResult<Self> {
        if sample_rate <= 0.0 {
            return Err(DspError::InvalidSampleRate(sample_rate));
        }
        if rf_freq <= 0.0 {
            return Err(DspError::InvalidFrequency(rf_freq));
        }
        let samples_per_cycle = sample_rate / rf_freq;
        if chunk_size == 0 || (chunk_size as f64) <= samples_per_cycle {
            return Err(DspError::InvalidChunkSize {
                chunk_size,
                samples_per_cycle,
            });
        }

        let periods = ((chunk_size as f64 - samples_per_cycle) / samples_per_cycle).floor() as usize;
        if periods == 0 {
            return Err(DspError::InvalidChunkSize {
                chunk_size,
                samples_per_cycle,
            });
        }
        let lut_len = (samples_per_cycle * periods as f64).floor() as usize;
        let offset = samples_per_cycle as usize;

        let mut sin = vec![0i32; 2 * chunk_size];
        let mut cos = vec![0i32; 2 * chunk_size];
        for k in 0..lut_len {
            let phase = 2.0 * PI * rf_freq * k as f64 / sample_rate;
            sin[offset + k] = (LUT_SCALE * phase.sin()).round() as i32;
            cos[offset + k] = (LUT_SCALE * phase.cos()).round() as i32;
        }

        debug!(
            samples_per_cycle,
            periods, lut_len, chunk_size, "built chunk-aligned quadrature LUT"
        );

        Ok(Self {
            sin,
            cos,
            samples_per_cycle,
            periods,
            lut_len,
            chunk_size,
        })
    }

    /// Sine reference table, `2 × chunk_size` entries.
    pub fn sin(&self) -> &[i32] {
        &self.sin
    }

    /// Cosine reference table, `2 × chunk_size` entries.
    pub fn cos(&self) -> &[i32] {
        &self.cos
    }

    /// Real-valued carrier period in samples.
    pub fn samples_per_cycle(&self) -> f64 {
        self.samples_per_cycle
    }

    /// Number of whole carrier periods held in the non-zero region.
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Length of the non-zero oscillator region.
    pub fn lut_len(&self) -> usize {
        self.lut_len
    }

    /// Length of the leading zero run.
    pub fn leading_zeros(&self) -> usize {
        self.samples_per_cycle as usize
    }

    /// Total table length (`2 × chunk_size`).
    pub fn table_len(&self) -> usize {
        self.sin.len()
    }

    /// Accumulation chunk size the tables were aligned to.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

/// Best-fit single sine table for cyclic reuse.
///
/// The table is the prefix of a full-resolution one-cycle-per-period sine
/// sweep, truncated at the index (searched from `floor(sample_rate/freq)`
/// up to `max_len`) whose sample is closest to a zero crossing, so the
/// wrap from the last entry back to index 0 introduces the smallest
/// possible phase error.
#[derive(Debug, Clone)]
pub struct BestFitLut {
    table: Vec<i32>,
}

impl BestFitLut {
    /// Search for the best truncation length and build the table.
    ///
    /// Fails if less than one whole cycle of `freq` fits below `max_len`.
    pub fn build(sample_rate: f64, freq: f64, max_len: usize) -> DspResult<Self> {
        if sample_rate <= 0.0 {
            return Err(DspError::InvalidSampleRate(sample_rate));
        }
        if freq <= 0.0 {
            return Err(DspError::InvalidFrequency(freq));
        }
        let needed = (sample_rate / freq).floor() as usize;
        if needed == 0 {
            // carrier above the sample rate cannot be tabulated
            return Err(DspError::InvalidFrequency(freq));
        }
        if needed >= max_len {
            return Err(DspError::LutTooShort { needed, max_len });
        }

        let candidate: Vec<f64> = (0..max_len)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect();

        let mut best = needed;
        for i in needed..max_len {
            if candidate[i].abs() < candidate[best].abs() {
                best = i;
            }
        }

        debug!(
            best_fit_len = best,
            boundary_value = candidate[best],
            "selected best-fit LUT length"
        );

        let table = candidate[..best]
            .iter()
            .map(|&v| (LUT_SCALE * v).round() as i32)
            .collect();
        Ok(Self { table })
    }

    /// The truncated oscillator table.
    pub fn table(&self) -> &[i32] {
        &self.table
    }

    /// Chosen best-fit length.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
