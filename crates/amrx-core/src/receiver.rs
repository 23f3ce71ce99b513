//! AM Receiver — two-stage cascaded demodulation
//!
//! Composite block wiring the full chain together:
//!
//! ```text
//! RF samples → ChunkedMixer (sin/cos LUT) → IF I/Q
//!            → SingleTapMixer × 2 (residual-frequency LUT) → AF I/Q
//!            → AmDetector (smoothing + envelope/phase) → audio
//! ```
//!
//! The first stage does not mix at the nominal carrier: an embedded LO
//! table can only realize an integer number of samples per cycle, so the
//! achievable LO is `if_freq = sample_rate / floor(sample_rate /
//! carrier_freq)`. The leftover `if_freq − carrier_freq` is the residual
//! frequency the second stage mixes at.
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::config::ReceiverConfig;
//! use amrx_core::receiver::AmReceiver;
//! use amrx_core::am_source::AmSource;
//!
//! let config = ReceiverConfig {
//!     num_samples: 8_192,
//!     dpsk_period: None,
//!     ..Default::default()
//! };
//! let source = AmSource::new(config.sample_rate, config.carrier_freq, config.modulating_freq)
//!     .unwrap()
//!     .with_modulation(config.modulation_depth, config.amplitude, config.dc_offset);
//! let wave = source.generate(config.num_samples);
//!
//! let receiver = AmReceiver::new(config).unwrap();
//! let out = receiver.demodulate_waveform(&wave).unwrap();
//! assert_eq!(out.if_iq.len(), 128); // floor(8192 / 64)
//! assert_eq!(out.audio.envelope.len(), 128);
//! ```

use crate::am_detector::{AmDetector, AudioOutput};
use crate::am_source::Waveform;
use crate::chunked_mixer::ChunkedMixer;
use crate::config::ReceiverConfig;
use crate::lut::{BestFitLut, QuadratureLut};
use crate::single_tap_mixer::SingleTapMixer;
use crate::types::{DspResult, IqSample, Sample};
use tracing::debug;

/// Output of one full demodulation pass.
#[derive(Debug, Clone)]
pub struct DemodOutput {
    /// Stage-1 I/Q, one sample per chunk.
    pub if_iq: Vec<IqSample>,
    /// Stage-1 envelope magnitudes.
    pub if_envelope: Vec<Sample>,
    /// Stage-1 phases, radians.
    pub if_phase: Vec<Sample>,
    /// Stage-2 audio output.
    pub audio: AudioOutput,
    /// Sample rate of the stage-1 output.
    pub if_sample_rate: f64,
    /// Stage-2 mixing frequency.
    pub residual_freq: f64,
}

/// Two-stage AM/DPSK receiver.
///
/// Holds only derived configuration; every [`demodulate`](Self::demodulate)
/// call builds its own mixer and filter state, so one receiver can process
/// any number of independent buffers.
#[derive(Debug, Clone)]
pub struct AmReceiver {
    config: ReceiverConfig,
    if_freq: f64,
    if_sample_rate: f64,
    residual_freq: f64,
}

impl AmReceiver {
    /// Validate the configuration and derive the stage frequencies.
    pub fn new(config: ReceiverConfig) -> DspResult<Self> {
        config.validate()?;
        let if_freq = config.sample_rate / (config.sample_rate / config.carrier_freq).floor();
        let if_sample_rate = if config.chunked {
            config.sample_rate / config.chunk_size as f64
        } else {
            config.sample_rate
        };
        let residual_freq = if_freq - config.carrier_freq;
        debug!(
            if_freq,
            if_sample_rate, residual_freq, "derived receiver frequencies"
        );
        Ok(Self {
            config,
            if_freq,
            if_sample_rate,
            residual_freq,
        })
    }

    /// Achievable first-stage LO frequency in Hz.
    pub fn if_freq(&self) -> f64 {
        self.if_freq
    }

    /// Sample rate of the stage-1 output in Hz.
    pub fn if_sample_rate(&self) -> f64 {
        self.if_sample_rate
    }

    /// Frequency offset remaining after the first stage, in Hz.
    pub fn residual_freq(&self) -> f64 {
        self.residual_freq
    }

    /// The validated configuration.
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Demodulate a buffer of real-valued RF samples.
    pub fn demodulate(&self, samples: &[Sample]) -> DspResult<DemodOutput> {
        // stage 1: RF → IF quadrature down-conversion
        let lut = QuadratureLut::chunk_aligned(
            self.config.sample_rate,
            self.if_freq,
            self.config.chunk_size,
        )?;
        let mut mixer = if self.config.chunked {
            ChunkedMixer::new(lut)
        } else {
            ChunkedMixer::continuous(lut)
        };
        let if_iq = mixer.process(samples);
        let if_envelope: Vec<Sample> = if_iq.iter().map(|s| s.norm()).collect();
        let if_phase: Vec<Sample> = if_iq.iter().map(|s| s.arg()).collect();

        // stage 2: IF → AF mixing at the residual frequency
        let i: Vec<Sample> = if_iq.iter().map(|s| s.re).collect();
        let q: Vec<Sample> = if_iq.iter().map(|s| s.im).collect();
        let (af_i, af_q) = if self.residual_freq > 0.0 {
            let af_lut = BestFitLut::build(
                self.if_sample_rate,
                self.residual_freq,
                self.config.af_lut_max_len,
            )?;
            // independent cursors per channel
            let mut i_mixer = SingleTapMixer::new(af_lut.clone());
            let mut q_mixer = SingleTapMixer::new(af_lut);
            (i_mixer.process(&i), q_mixer.process(&q))
        } else {
            // the sample rate divides the carrier exactly, the IF is
            // already at baseband
            debug!("zero residual frequency, stage-2 mix is a pass-through");
            (i, q)
        };

        let mut detector = AmDetector::new(self.config.filter_alpha);
        let audio = detector.detect(&af_i, &af_q);

        Ok(DemodOutput {
            if_iq,
            if_envelope,
            if_phase,
            audio,
            if_sample_rate: self.if_sample_rate,
            residual_freq: self.residual_freq,
        })
    }

    /// Demodulate a synthesized waveform through the firmware ADC domain
    /// (quantized 12-bit samples widened to `f64`).
    pub fn demodulate_waveform(&self, waveform: &Waveform) -> DspResult<DemodOutput> {
        let samples: Vec<Sample> = waveform.to_u12().iter().map(|&v| v as f64).collect();
        self.demodulate(&samples)
    }

    /// Demodulate a raw unsigned 8-bit capture buffer (the serial capture
    /// interface delivers one byte per sample).
    pub fn demodulate_bytes(&self, bytes: &[u8]) -> DspResult<DemodOutput> {
        let samples: Vec<Sample> = bytes.iter().map(|&b| b as f64).collect();
        self.demodulate(&samples)
    }
}
