//! Generate firmware header files for the AM receiver bring-up
//!
//! Synthesizes the DPSK-keyed AM test waveform, exports it together with
//! the mixer lookup tables as C headers, then runs the full demodulation
//! chain over the same waveform and prints summary statistics.
//!
//! Run with: cargo run --example generate_am_headers -p amrx-core

use amrx_core::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ReceiverConfig::default();
    let receiver = AmReceiver::new(config.clone())?;

    println!("carrier:  {} Hz", config.carrier_freq);
    println!("IF:       {:.2} Hz", receiver.if_freq());
    println!("IF rate:  {:.2} Hz", receiver.if_sample_rate());
    println!("residual: {:.2} Hz\n", receiver.residual_freq());

    // Test waveform, keyed like the firmware stimulus
    let source = AmSource::new(
        config.sample_rate,
        config.carrier_freq,
        config.modulating_freq,
    )?
    .with_modulation(config.modulation_depth, config.amplitude, config.dc_offset);
    let mut wave = source.generate(config.num_samples);
    if let Some(period) = config.dpsk_period {
        wave.apply_dpsk(period, config.dc_offset)?;
    }

    write_c_header("am_wave.h", "am_wave", &wave.to_u12(), CArrayType::Uint16)?;
    println!("exported am_wave.h ({} samples)", wave.len());

    // Stage-1 quadrature tables at the achievable LO frequency
    let lut = QuadratureLut::chunk_aligned(config.sample_rate, receiver.if_freq(), config.chunk_size)?;
    write_c_header("sin_lut.h", "sin_lut", lut.sin(), CArrayType::Int32)?;
    write_c_header("cos_lut.h", "cos_lut", lut.cos(), CArrayType::Int32)?;
    println!(
        "exported sin_lut.h / cos_lut.h ({} entries, {} whole periods)",
        lut.table_len(),
        lut.periods()
    );

    // Stage-2 best-fit table at the residual frequency
    let af_lut = BestFitLut::build(
        receiver.if_sample_rate(),
        receiver.residual_freq(),
        config.af_lut_max_len,
    )?;
    write_c_header("af_sin_lut.h", "af_sin_lut", af_lut.table(), CArrayType::Int32)?;
    println!("exported af_sin_lut.h ({} entries)\n", af_lut.len());

    // Demodulate the stimulus through the full chain
    let out = receiver.demodulate_waveform(&wave)?;
    let peak = out
        .audio
        .envelope
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let mean = out.audio.envelope.iter().sum::<f64>() / out.audio.envelope.len() as f64;

    println!("IF samples:     {}", out.if_iq.len());
    println!("audio samples:  {}", out.audio.envelope.len());
    println!("envelope mean:  {mean:.1}");
    println!("envelope peak:  {peak:.1}");

    Ok(())
}
