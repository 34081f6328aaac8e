//! Renders a filter sweep over white noise to a WAV file.
//!
//! Usage: cargo run --example render_wav [output.wav] [type]
//!
//! The cutoff sweeps exponentially from 100 Hz to 10 kHz over four seconds. Any of the
//! eight filter types may be given; the default is a resonant low-pass.

use anyhow::{Context, Result};
use audio_biquad::{
    AudioBuffer, BiquadFilter, FilterOptions, FilterType, Param, Stream, StreamFormat, WhiteNoise,
};
use rand::SeedableRng;

const SAMPLE_RATE: u32 = 44100;
const SECONDS: f64 = 4.0;
const BLOCK: usize = 256;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "sweep.wav".to_string());
    let filter_type: FilterType = match args.next() {
        Some(name) => name.parse()?,
        None => FilterType::LowPass,
    };

    let format = StreamFormat::new(SAMPLE_RATE as f64, 1)?;
    let options = FilterOptions {
        filter_type,
        q: if matches!(filter_type, FilterType::LowPass | FilterType::HighPass) {
            12.0
        } else {
            4.0
        },
        gain: 12.0,
        ..Default::default()
    };
    let filter = BiquadFilter::new(options, format)?.with_frequency(Param::time_varying(|t| {
        100.0 * 100.0_f64.powf((t / SECONDS).min(1.0))
    }));
    let mut stream = Stream::new(format).with(filter);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(&path, spec).with_context(|| format!("creating {path}"))?;

    let mut noise = WhiteNoise::with_rng(rand::rngs::StdRng::seed_from_u64(1));
    let mut block = AudioBuffer::new(1, BLOCK);
    let total = (SECONDS * SAMPLE_RATE as f64) as usize;
    let mut peak: f64 = 0.0;

    for _ in 0..total.div_ceil(BLOCK) {
        block.fill_from(&mut noise);
        // Keep headroom for resonance
        if let Some(samples) = block.channel_mut(0) {
            samples.iter_mut().for_each(|s| *s *= 0.25);
        }
        stream.process_block(&mut block)?;

        for &sample in block.channel(0).unwrap_or_default() {
            peak = peak.max(sample.abs());
            let clipped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clipped * i16::MAX as f64) as i16)?;
        }
    }
    writer.finalize()?;

    println!(
        "Wrote {} ({} filter, {} frames, peak {:.3})",
        path,
        filter_type,
        stream.context().frames_processed(),
        peak
    );
    Ok(())
}
