//! # amrx-core — Software-Defined AM/DPSK Receiver Chain
//!
//! Prototype of a two-stage AM/DPSK receiver intended for later embedding
//! in microcontroller firmware. The crate synthesizes a modulated RF test
//! waveform, demodulates it the way the embedded mixer will — with
//! runtime-generated integer lookup tables emulating a fixed local
//! oscillator — and exports the tables and waveforms as C constant arrays
//! for the target.
//!
//! ## Signal Flow
//!
//! ```text
//! TX: AmSource → Waveform (AM, optional DPSK) → u12 quantization → am_wave.h
//! RX: RF samples → ChunkedMixer (chunk-aligned sin/cos LUT) → IF I/Q
//!               → SingleTapMixer × 2 (best-fit residual LUT) → AF I/Q
//!               → AmDetector (EnvelopeFilter smoothing)     → envelope + phase
//! ```
//!
//! The first stage accumulates quadrature dot products over fixed-size
//! chunks, decimating by the chunk size; carrier phase is kept continuous
//! across chunk boundaries by wrapping the table cursor against the
//! carrier period. The second stage mixes the leftover residual frequency
//! down to audio with a single cyclic table.
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::am_source::AmSource;
//! use amrx_core::chunked_mixer::ChunkedMixer;
//! use amrx_core::lut::QuadratureLut;
//!
//! // Synthesize 8192 samples of a 225 kHz carrier modulated at 1099 Hz
//! let source = AmSource::new(2_250_000.0, 225_000.0, 1_099.0)
//!     .unwrap()
//!     .with_modulation(0.3, 0.02, 0.5);
//! let wave = source.generate(8_192);
//!
//! // Down-convert in 64-sample chunks
//! let lut = QuadratureLut::chunk_aligned(2_250_000.0, 225_000.0, 64).unwrap();
//! let mut mixer = ChunkedMixer::new(lut);
//! let if_iq = mixer.process(wave.samples());
//! assert_eq!(if_iq.len(), 128);
//! ```

pub mod am_detector;
pub mod am_source;
pub mod c_header;
pub mod chunked_mixer;
pub mod config;
pub mod envelope_filter;
pub mod lut;
pub mod receiver;
pub mod single_tap_mixer;
pub mod types;

pub use am_detector::{AmDetector, AudioOutput};
pub use am_source::{AmSource, Waveform};
pub use c_header::{format_c_header, write_c_header, CArrayType};
pub use chunked_mixer::ChunkedMixer;
pub use config::ReceiverConfig;
pub use envelope_filter::EnvelopeFilter;
pub use lut::{BestFitLut, QuadratureLut};
pub use receiver::{AmReceiver, DemodOutput};
pub use single_tap_mixer::SingleTapMixer;
pub use types::{Complex, DspError, DspResult, IqSample, Sample};

/// Commonly used types.
pub mod prelude {
    pub use crate::am_detector::{AmDetector, AudioOutput};
    pub use crate::am_source::{AmSource, Waveform};
    pub use crate::c_header::{write_c_header, CArrayType};
    pub use crate::chunked_mixer::ChunkedMixer;
    pub use crate::config::ReceiverConfig;
    pub use crate::envelope_filter::EnvelopeFilter;
    pub use crate::lut::{BestFitLut, QuadratureLut};
    pub use crate::receiver::{AmReceiver, DemodOutput};
    pub use crate::single_tap_mixer::SingleTapMixer;
    pub use crate::types::{DspError, DspResult, IqSample, Sample};
}
