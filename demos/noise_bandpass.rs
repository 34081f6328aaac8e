//! Two seconds of white noise through a very narrow band-pass at 440 Hz.
//!
//! The band is so narrow that the output is close to a pure tone, so a gain stage
//! after the filter brings it back to a listenable level.

// Only the audio output half of the helpers is used here
#[allow(dead_code)]
mod common;

use anyhow::Result;
use audio_biquad::{
    AudioBlock, AudioBuffer, BiquadFilter, FilterError, FilterOptions, FilterType, Processor,
    Stream, StreamContext, WhiteNoise,
};
use common::{ExampleAudioState, device_format, play};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fixed linear gain.
struct Volume(f64);

impl Processor for Volume {
    fn process(
        &mut self,
        block: &mut dyn AudioBlock,
        _ctx: &StreamContext,
    ) -> Result<(), FilterError> {
        for index in 0..block.channel_count() {
            let samples = block
                .channel_mut(index)
                .ok_or(FilterError::MissingChannel { index })?;
            samples.iter_mut().for_each(|s| *s *= self.0);
        }
        Ok(())
    }
}

struct AudioState {
    noise: WhiteNoise<rand::rngs::StdRng>,
    stream: Stream,
}

impl ExampleAudioState for AudioState {
    fn render(&mut self, block: &mut AudioBuffer) -> Result<(), FilterError> {
        block.fill_from(&mut self.noise);
        self.stream.process_block(block)
    }
}

fn main() -> Result<()> {
    use rand::SeedableRng;

    let format = device_format()?;
    println!(
        "Band-pass noise at {} Hz, {} channel(s)",
        format.sample_rate(),
        format.channels()
    );

    let options = FilterOptions {
        filter_type: FilterType::BandPass,
        q: 1000.0,
        frequency: 440.0,
        gain: 100.0,
        ..Default::default()
    };
    let stream = Stream::new(format)
        .with(BiquadFilter::new(options, format)?)
        .with(Volume(20.0));

    let state = Arc::new(Mutex::new(AudioState {
        noise: WhiteNoise::with_rng(rand::rngs::StdRng::from_entropy()),
        stream,
    }));

    let _stream = play(state)?;
    std::thread::sleep(Duration::from_secs(2));
    Ok(())
}
