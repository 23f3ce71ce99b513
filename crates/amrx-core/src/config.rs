//! Receiver Configuration
//!
//! YAML-backed parameter set for the synthesis and demodulation chain.
//! Defaults mirror the bring-up configuration of the firmware target
//! (2.571429 MHz sampling, 225 kHz carrier, 1099 Hz tone, 64-sample
//! chunks, 46000-sample DPSK symbols).
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::config::ReceiverConfig;
//!
//! let config = ReceiverConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let yaml = config.to_yaml().unwrap();
//! let parsed = ReceiverConfig::from_yaml(&yaml).unwrap();
//! assert_eq!(parsed.chunk_size, config.chunk_size);
//! ```

use crate::types::{DspError, DspResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full parameter set for one synthesis + demodulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// ADC/DAC sample rate in Hz.
    pub sample_rate: f64,
    /// Nominal RF carrier frequency in Hz.
    pub carrier_freq: f64,
    /// Modulating (audio) tone frequency in Hz.
    pub modulating_freq: f64,
    /// Number of samples to synthesize.
    pub num_samples: usize,
    /// AM modulation depth.
    pub modulation_depth: f64,
    /// Carrier amplitude before the DC offset is applied.
    pub amplitude: f64,
    /// DC offset of the normalized waveform.
    pub dc_offset: f64,
    /// DPSK symbol period in samples; `None` disables keying.
    pub dpsk_period: Option<usize>,
    /// Accumulation chunk size of the first mixer stage.
    pub chunk_size: usize,
    /// Chunk-accumulating (true) or continuous (false) first stage.
    pub chunked: bool,
    /// Input weight of the audio smoothing filters.
    pub filter_alpha: f64,
    /// Search bound for the audio-stage best-fit table.
    pub af_lut_max_len: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            sample_rate: 2_571_429.0,
            carrier_freq: 225_000.0,
            modulating_freq: 1_099.0,
            num_samples: 200_000,
            modulation_depth: 0.3,
            amplitude: 0.02,
            dc_offset: 0.5,
            dpsk_period: Some(46_000),
            chunk_size: 64,
            chunked: true,
            filter_alpha: 0.1,
            af_lut_max_len: 1024,
        }
    }
}

impl ReceiverConfig {
    /// Check the configuration before any stage runs.
    pub fn validate(&self) -> DspResult<()> {
        if self.sample_rate <= 0.0 {
            return Err(DspError::InvalidSampleRate(self.sample_rate));
        }
        if self.carrier_freq <= 0.0 || self.carrier_freq >= self.sample_rate {
            return Err(DspError::InvalidFrequency(self.carrier_freq));
        }
        if self.modulating_freq <= 0.0 {
            return Err(DspError::InvalidFrequency(self.modulating_freq));
        }
        if self.chunk_size == 0 {
            return Err(DspError::InvalidChunkSize {
                chunk_size: 0,
                samples_per_cycle: self.sample_rate / self.carrier_freq,
            });
        }
        if self.dpsk_period == Some(0) {
            return Err(DspError::InvalidDpskPeriod);
        }
        if self.filter_alpha <= 0.0 || self.filter_alpha > 1.0 {
            return Err(DspError::InvalidFilterAlpha(self.filter_alpha));
        }
        Ok(())
    }

    /// Parse from a YAML string and validate.
    pub fn from_yaml(yaml: &str) -> DspResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| DspError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file and validate.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> DspResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DspError::ConfigFile(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> DspResult<String> {
        serde_yaml::to_string(self).map_err(|e| DspError::ConfigFile(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ReceiverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ReceiverConfig {
            chunk_size: 128,
            chunked: false,
            dpsk_period: None,
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        let parsed = ReceiverConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let parsed = ReceiverConfig::from_yaml("chunk_size: 32\n").unwrap();
        assert_eq!(parsed.chunk_size, 32);
        assert_eq!(parsed.sample_rate, 2_571_429.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = ReceiverConfig {
            sample_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DspError::InvalidSampleRate(_))
        ));

        config = ReceiverConfig {
            carrier_freq: 3_000_000.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DspError::InvalidFrequency(_))
        ));

        config = ReceiverConfig {
            filter_alpha: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DspError::InvalidFilterAlpha(_))
        ));

        config = ReceiverConfig {
            dpsk_period: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(DspError::InvalidDpskPeriod));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(matches!(
            ReceiverConfig::from_yaml("chunk_size: [not a number]"),
            Err(DspError::ConfigFile(_))
        ));
    }
}
