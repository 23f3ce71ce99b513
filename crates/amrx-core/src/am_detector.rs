//! AM Detector — audio-stage envelope and phase extraction
//!
//! Assembles the second demodulation stage: the mixed I and Q sequences
//! are smoothed independently, the envelope magnitude `sqrt(I²+Q²)` and
//! phase `atan2(Q, I)` are derived from the *filtered* channels, and the
//! envelope is smoothed once more. Phase is reported unfiltered.
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::am_detector::AmDetector;
//!
//! let mut detector = AmDetector::default();
//! let audio = detector.detect(&[3.0, 3.0], &[4.0, 4.0]);
//! assert!((audio.envelope[0] - 5.0).abs() < 1e-12);
//! assert!((audio.phase[0] - (4.0f64).atan2(3.0)).abs() < 1e-12);
//! ```

use crate::envelope_filter::{EnvelopeFilter, DEFAULT_ALPHA};
use crate::types::{IqSample, Sample};

/// Demodulated audio-stage output sequences.
#[derive(Debug, Clone, Default)]
pub struct AudioOutput {
    /// Smoothed in-phase channel.
    pub i: Vec<Sample>,
    /// Smoothed quadrature channel.
    pub q: Vec<Sample>,
    /// Smoothed envelope magnitude.
    pub envelope: Vec<Sample>,
    /// Phase of the filtered I/Q, radians in [-π, π].
    pub phase: Vec<Sample>,
}

/// Stage-2 envelope/phase detector.
#[derive(Debug, Clone)]
pub struct AmDetector {
    i_filter: EnvelopeFilter,
    q_filter: EnvelopeFilter,
    envelope_filter: EnvelopeFilter,
}

impl AmDetector {
    /// Create a detector whose three smoothers share one coefficient.
    pub fn new(alpha: f64) -> Self {
        Self {
            i_filter: EnvelopeFilter::new(alpha),
            q_filter: EnvelopeFilter::new(alpha),
            envelope_filter: EnvelopeFilter::new(alpha),
        }
    }

    /// Filter the mixed I/Q channels and extract envelope and phase.
    ///
    /// The sequences are processed pairwise; if the lengths differ, the
    /// excess of the longer channel is ignored.
    pub fn detect(&mut self, i: &[Sample], q: &[Sample]) -> AudioOutput {
        let filtered_i = self.i_filter.process(i);
        let filtered_q = self.q_filter.process(q);

        let n = filtered_i.len().min(filtered_q.len());
        let mut envelope = Vec::with_capacity(n);
        let mut phase = Vec::with_capacity(n);
        for k in 0..n {
            let iq = IqSample::new(filtered_i[k], filtered_q[k]);
            envelope.push(iq.norm());
            phase.push(iq.arg());
        }
        let envelope = self.envelope_filter.process(&envelope);

        AudioOutput {
            i: filtered_i,
            q: filtered_q,
            envelope,
            phase,
        }
    }

    /// Reset all filter state.
    pub fn reset(&mut self) {
        self.i_filter.reset();
        self.q_filter.reset();
        self.envelope_filter.reset();
    }
}

impl Default for AmDetector {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_input_constant_envelope() {
        let mut detector = AmDetector::new(0.1);
        let i = vec![3.0; 60];
        let q = vec![4.0; 60];
        let audio = detector.detect(&i, &q);
        for &e in &audio.envelope {
            assert!((e - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_envelope_from_filtered_channels() {
        // the envelope must be derived after I/Q smoothing: an impulse on
        // I is attenuated before the magnitude is taken
        let mut detector = AmDetector::new(0.1);
        let i = vec![0.0, 100.0, 0.0];
        let q = vec![0.0, 0.0, 0.0];
        let audio = detector.detect(&i, &q);
        // filtered I: [0, 10, 9]; envelope filter then smooths again
        assert!((audio.i[1] - 10.0).abs() < 1e-12);
        assert!((audio.envelope[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_output_lengths_match() {
        let mut detector = AmDetector::default();
        let audio = detector.detect(&[1.0; 10], &[1.0; 10]);
        assert_eq!(audio.i.len(), 10);
        assert_eq!(audio.q.len(), 10);
        assert_eq!(audio.envelope.len(), 10);
        assert_eq!(audio.phase.len(), 10);
    }

    #[test]
    fn test_phase_quadrants() {
        let mut detector = AmDetector::new(1.0); // passthrough
        let audio = detector.detect(&[1.0, -1.0], &[1.0, -1.0]);
        assert!((audio.phase[0] - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((audio.phase[1] + 3.0 * std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }
}
