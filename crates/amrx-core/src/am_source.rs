//! AM Signal Source — amplitude-modulated test waveform synthesis
//!
//! Generates the normalized AM test signal used to exercise the receiver
//! chain without hardware, optionally keyed with differential phase-shift
//! inversion (DPSK). The output doubles as the firmware stimulus: its
//! quantized 12-bit form is what the target DAC plays back into the ADC.
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::am_source::AmSource;
//!
//! let source = AmSource::new(2_250_000.0, 225_000.0, 1_099.0)
//!     .unwrap()
//!     .with_modulation(0.3, 0.02, 0.5);
//! let wave = source.generate(8_192);
//! assert_eq!(wave.len(), 8_192);
//! // Output is normalized to [0, 1]
//! assert!(wave.samples().iter().all(|&s| (0.0..=1.0).contains(&s)));
//! ```

use crate::types::{DspError, DspResult, Sample};
use std::f64::consts::PI;

/// Scale factor of the quantized waveform (12-bit DAC range).
pub const WAVE_SCALE: f64 = 4096.0;

/// A synthesized test waveform.
///
/// Ordered sequence of real-valued samples in `[0, 1]` together with the
/// sample rate and the nominal carrier frequency it was generated at.
/// Immutable after synthesis except for in-place DPSK keying.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<Sample>,
    sample_rate: f64,
    carrier_freq: f64,
}

impl Waveform {
    /// The normalized samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Nominal carrier frequency in Hz.
    pub fn carrier_freq(&self) -> f64 {
        self.carrier_freq
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Quantize to the unsigned 12-bit export form: `round(value × 4096)`.
    pub fn to_u12(&self) -> Vec<u16> {
        self.samples
            .iter()
            .map(|&s| (s * WAVE_SCALE).round() as u16)
            .collect()
    }

    /// Key a differential phase inversion onto the waveform, in place.
    ///
    /// Every `symbol_period` samples the sign of `(sample - dc_offset)` is
    /// flipped before re-adding `dc_offset`. The phase starts at +1. The
    /// period need not divide the waveform length; the final partial symbol
    /// simply runs shorter.
    pub fn apply_dpsk(&mut self, symbol_period: usize, dc_offset: f64) -> DspResult<()> {
        if symbol_period == 0 {
            return Err(DspError::InvalidDpskPeriod);
        }
        let mut count = 0usize;
        let mut phase = 1.0;
        for sample in &mut self.samples {
            *sample = (*sample - dc_offset) * phase + dc_offset;
            count += 1;
            if count >= symbol_period {
                count = 0;
                phase = -phase;
            }
        }
        Ok(())
    }
}

/// Amplitude-modulated test signal generator.
///
/// For sample index `t` the output is
///
/// ```text
/// clip01((1 + depth·sin(2π·f_mod·t)) · sin(2π·f_c·t) · amplitude + dc_offset)
/// ```
///
/// Synthesis is deterministic: identical parameters always produce a
/// bit-identical waveform.
#[derive(Debug, Clone)]
pub struct AmSource {
    sample_rate: f64,
    carrier_freq: f64,
    modulating_freq: f64,
    modulation_depth: f64,
    amplitude: f64,
    dc_offset: f64,
}

impl AmSource {
    /// Create a source with default modulation (depth 0.5, amplitude 0.5,
    /// DC offset 0.5).
    ///
    /// Rejects non-positive sample rates and frequencies before any
    /// synthesis runs.
    pub fn new(sample_rate: f64, carrier_freq: f64, modulating_freq: f64) -> DspResult<Self> {
        if sample_rate <= 0.0 {
            return Err(DspError::InvalidSampleRate(sample_rate));
        }
        if carrier_freq <= 0.0 {
            return Err(DspError::InvalidFrequency(carrier_freq));
        }
        if modulating_freq <= 0.0 {
            return Err(DspError::InvalidFrequency(modulating_freq));
        }
        Ok(Self {
            sample_rate,
            carrier_freq,
            modulating_freq,
            modulation_depth: 0.5,
            amplitude: 0.5,
            dc_offset: 0.5,
        })
    }

    /// Set modulation depth, carrier amplitude and DC offset.
    pub fn with_modulation(mut self, depth: f64, amplitude: f64, dc_offset: f64) -> Self {
        self.modulation_depth = depth;
        self.amplitude = amplitude;
        self.dc_offset = dc_offset;
        self
    }

    /// Synthesize `num_samples` samples of the AM waveform.
    pub fn generate(&self, num_samples: usize) -> Waveform {
        let mut samples = Vec::with_capacity(num_samples);
        for t in 0..num_samples {
            let time = t as f64 / self.sample_rate;
            let modulator = (2.0 * PI * self.modulating_freq * time).sin();
            let carrier = (2.0 * PI * self.carrier_freq * time).sin();
            let value = (1.0 + self.modulation_depth * modulator) * carrier * self.amplitude
                + self.dc_offset;
            samples.push(value.clamp(0.0, 1.0));
        }
        Waveform {
            samples,
            sample_rate: self.sample_rate,
            carrier_freq: self.carrier_freq,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Carrier frequency in Hz.
    pub fn carrier_freq(&self) -> f64 {
        self.carrier_freq
    }
}
