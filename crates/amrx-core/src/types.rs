//! Core types for the AM receiver chain
//!
//! Defines the fundamental sample types used throughout the crate and the
//! error taxonomy for configuration problems.
//!
//! ## I/Q samples
//!
//! The quadrature mixer produces pairs of accumulated sums, one taken
//! against the sine reference table (I, in-phase) and one against the
//! cosine table (Q, quadrature). Together they carry both amplitude and
//! phase of the down-converted carrier:
//!
//! - magnitude: `iq.norm()` = `sqrt(I² + Q²)`
//! - phase: `iq.arg()` = `atan2(Q, I)`

use num_complex::Complex64;

/// Type alias for complex numbers using f64 precision.
pub type Complex = Complex64;

/// A single I/Q sample point.
pub type IqSample = Complex64;

/// A real-valued signal sample.
pub type Sample = f64;

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Errors that can occur while configuring the receiver chain.
///
/// Every variant is a configuration error detected before any synthesis or
/// mixing begins; the processing stages themselves are total functions over
/// their validated input domains.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DspError {
    #[error("invalid sample rate: {0} Hz, must be positive")]
    InvalidSampleRate(f64),

    #[error("invalid frequency: {0} Hz, must be positive and below the sample rate")]
    InvalidFrequency(f64),

    #[error(
        "chunk size {chunk_size} cannot hold a whole carrier period of \
         {samples_per_cycle:.2} samples"
    )]
    InvalidChunkSize {
        chunk_size: usize,
        samples_per_cycle: f64,
    },

    #[error("best-fit table bound {max_len} cannot hold one carrier cycle of {needed} samples")]
    LutTooShort { needed: usize, max_len: usize },

    #[error("invalid filter alpha: {0}, must be in (0, 1]")]
    InvalidFilterAlpha(f64),

    #[error("invalid DPSK symbol period: must be at least 1 sample")]
    InvalidDpskPeriod,

    #[error("config error: {0}")]
    ConfigFile(String),
}
