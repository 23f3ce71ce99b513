//! Chunked Quadrature Mixer — RF→IF down-conversion
//!
//! Emulates the firmware's fixed-LO quadrature detector: the input signal
//! is multiplied against the chunk-aligned sin/cos tables and accumulated
//! over fixed-size chunks, producing one I/Q output per chunk. The output
//! sample rate is `input_rate / chunk_size`.
//!
//! Carrier phase is kept continuous across chunk boundaries by realigning
//! the table cursor against the *carrier period* rather than the table
//! length: whenever the cursor would start a chunk at or beyond
//! `chunk_size`, it is wrapped with `lut_pos mod samples_per_cycle`. A
//! table-length modulus would accumulate phase error from the zero padding;
//! the carrier-period modulus re-synchronizes the emulated oscillator
//! exactly.
//!
//! ## Example
//!
//! ```rust
//! use amrx_core::chunked_mixer::ChunkedMixer;
//! use amrx_core::lut::QuadratureLut;
//!
//! let lut = QuadratureLut::chunk_aligned(2_250_000.0, 225_000.0, 64).unwrap();
//! let mut mixer = ChunkedMixer::new(lut);
//!
//! let input = vec![0.5; 8_192];
//! let iq = mixer.process(&input);
//! assert_eq!(iq.len(), 128); // floor(8192 / 64)
//! ```

use crate::lut::QuadratureLut;
use crate::types::{IqSample, Sample};

/// Fixed-chunk quadrature down-converting mixer.
///
/// The default contract accumulates I/Q dot products over `chunk_size`
/// input samples per output tick. The alternative continuous strategy
/// ([`ChunkedMixer::continuous`]) emits one quadrature product per input
/// sample with no accumulation or decimation, cycling the cursor over the
/// non-zero span of the table.
#[derive(Debug, Clone)]
pub struct ChunkedMixer {
    lut: QuadratureLut,
    chunk_size: usize,
    chunked: bool,
    lut_pos: usize,
}

impl ChunkedMixer {
    /// Create a chunk-accumulating mixer over the given table pair.
    pub fn new(lut: QuadratureLut) -> Self {
        let chunk_size = lut.chunk_size();
        Self {
            lut,
            chunk_size,
            chunked: true,
            lut_pos: 0,
        }
    }

    /// Create a mixer in the continuous (non-decimating) strategy.
    pub fn continuous(lut: QuadratureLut) -> Self {
        let mut mixer = Self::new(lut);
        mixer.chunked = false;
        mixer
    }

    /// Mix a block of input samples against the quadrature tables.
    ///
    /// Chunked mode: one [`IqSample`] per full chunk, in input order; a
    /// final partial chunk is dropped, so the output length is exactly
    /// `floor(input.len() / chunk_size)`. Continuous mode: one product per
    /// input sample.
    pub fn process(&mut self, input: &[Sample]) -> Vec<IqSample> {
        if self.chunked {
            self.process_chunked(input)
        } else {
            self.process_continuous(input)
        }
    }

    fn process_chunked(&mut self, input: &[Sample]) -> Vec<IqSample> {
        let num_chunks = input.len() / self.chunk_size;
        let mut output = Vec::with_capacity(num_chunks);
        let sin = self.lut.sin();
        let cos = self.lut.cos();

        for chunk in input.chunks_exact(self.chunk_size) {
            if self.lut_pos >= self.chunk_size {
                // wrap against the carrier period, not the table length
                self.lut_pos = (self.lut_pos as f64 % self.lut.samples_per_cycle()) as usize;
            }

            let mut i_sum = 0.0;
            let mut q_sum = 0.0;
            for &x in chunk {
                i_sum += x * sin[self.lut_pos] as f64;
                q_sum += x * cos[self.lut_pos] as f64;
                self.lut_pos += 1;
            }
            output.push(IqSample::new(i_sum, q_sum));
        }

        output
    }

    fn process_continuous(&mut self, input: &[Sample]) -> Vec<IqSample> {
        let span_start = self.lut.leading_zeros();
        let span_end = span_start + self.lut.lut_len();
        // the cursor lives in the non-zero span
        if self.lut_pos < span_start || self.lut_pos >= span_end {
            self.lut_pos = span_start;
        }

        let sin = self.lut.sin();
        let cos = self.lut.cos();
        let mut output = Vec::with_capacity(input.len());
        for &x in input {
            output.push(IqSample::new(
                x * sin[self.lut_pos] as f64,
                x * cos[self.lut_pos] as f64,
            ));
            self.lut_pos += 1;
            if self.lut_pos >= span_end {
                self.lut_pos = span_start;
            }
        }
        output
    }

    /// Current table cursor.
    pub fn lut_pos(&self) -> usize {
        self.lut_pos
    }

    /// Accumulation chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Whether the mixer runs the chunk-accumulating contract.
    pub fn is_chunked(&self) -> bool {
        self.chunked
    }

    /// Output sample rate for a given input rate.
    pub fn output_sample_rate(&self, input_rate: f64) -> f64 {
        if self.chunked {
            input_rate / self.chunk_size as f64
        } else {
            input_rate
        }
    }

    /// Reset the table cursor.
    pub fn reset(&mut self) {
        self.lut_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::am_source::AmSource;

    const SAMPLE_RATE: f64 = 2_250_000.0;
    const CARRIER: f64 = 225_000.0;
    const CHUNK: usize = 64;

    fn test_lut() -> QuadratureLut {
        QuadratureLut::chunk_aligned(SAMPLE_RATE, CARRIER, CHUNK).unwrap()
    }

    fn quantized_carrier(num_samples: usize, depth: f64) -> Vec<Sample> {
        AmSource::new(SAMPLE_RATE, CARRIER, 1_099.0)
            .unwrap()
            .with_modulation(depth, 0.02, 0.5)
            .generate(num_samples)
            .to_u12()
            .iter()
            .map(|&v| v as f64)
            .collect()
    }

    #[test]
    fn test_output_length() {
        let mut mixer = ChunkedMixer::new(test_lut());
        let iq = mixer.process(&quantized_carrier(8_192, 0.3));
        assert_eq!(iq.len(), 128, "floor(8192/64) chunks expected");
    }

    #[test]
    fn test_partial_chunk_dropped() {
        let mut mixer = ChunkedMixer::new(test_lut());
        let iq = mixer.process(&quantized_carrier(100, 0.3));
        assert_eq!(iq.len(), 1, "trailing 36 samples must be dropped");
    }

    #[test]
    fn test_no_realignment_on_first_chunk() {
        // lut_pos starts at 0 < chunk_size, so the cursor must run straight
        // through the first chunk and stop exactly at chunk_size
        let mut mixer = ChunkedMixer::new(test_lut());
        assert_eq!(mixer.lut_pos(), 0);
        let _ = mixer.process(&quantized_carrier(CHUNK, 0.3));
        assert_eq!(mixer.lut_pos(), CHUNK);
    }

    #[test]
    fn test_realignment_uses_carrier_period() {
        let mut mixer = ChunkedMixer::new(test_lut());
        let _ = mixer.process(&quantized_carrier(2 * CHUNK, 0.3));
        // second chunk started at 64 % 10 = 4, then advanced one chunk
        assert_eq!(mixer.lut_pos(), 4 + CHUNK);
    }

    #[test]
    fn test_pure_carrier_gives_constant_iq() {
        // with an integer samples-per-cycle and zero modulation depth the
        // signal is exactly periodic, so every chunk accumulates an
        // identical sum
        let mut mixer = ChunkedMixer::new(test_lut());
        let iq = mixer.process(&quantized_carrier(8_192, 0.0));
        let first = iq[0];
        for (n, &s) in iq.iter().enumerate() {
            assert!(
                (s - first).norm() < 1e-6,
                "chunk {n} diverged: {s} vs {first}"
            );
        }
        assert!(first.norm() > 0.0, "carrier energy must be non-zero");
    }

    #[test]
    fn test_phase_continuity_across_chunks() {
        // realignment must keep the cursor congruent with the carrier
        // phase: position mod samples_per_cycle equals the absolute input
        // index mod samples_per_cycle at every chunk start
        let mut mixer = ChunkedMixer::new(test_lut());
        let signal = quantized_carrier(CHUNK, 0.3);
        for chunk_index in 0..32usize {
            let start = mixer.lut_pos();
            let aligned = if start >= CHUNK { start % 10 } else { start };
            assert_eq!(
                aligned,
                (chunk_index * CHUNK) % 10,
                "phase drift entering chunk {chunk_index}"
            );
            let _ = mixer.process(&signal);
        }
    }

    #[test]
    fn test_continuous_mode_no_decimation() {
        let mut mixer = ChunkedMixer::continuous(test_lut());
        assert!(!mixer.is_chunked());
        let out = mixer.process(&quantized_carrier(100, 0.3));
        assert_eq!(out.len(), 100, "continuous mode emits one sample per input");
        assert_eq!(mixer.output_sample_rate(SAMPLE_RATE), SAMPLE_RATE);
        // cursor cycles inside the non-zero span
        assert!(mixer.lut_pos() >= 10 && mixer.lut_pos() < 60);
    }

    #[test]
    fn test_decimated_output_rate() {
        let mixer = ChunkedMixer::new(test_lut());
        assert_eq!(mixer.output_sample_rate(SAMPLE_RATE), SAMPLE_RATE / 64.0);
    }

    #[test]
    fn test_reset() {
        let mut mixer = ChunkedMixer::new(test_lut());
        let _ = mixer.process(&quantized_carrier(8_192, 0.3));
        mixer.reset();
        assert_eq!(mixer.lut_pos(), 0);
    }
}
