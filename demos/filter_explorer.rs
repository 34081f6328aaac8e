//! Interactive tour of the eight filter types over white noise.
//!
//! SPACE  cycle filter type
//! UP/DOWN  raise/lower the frequency by a semitone (via detune)
//! S  toggle an LFO sweep on the frequency
//! Q or ESC  quit

mod common;

use anyhow::Result;
use audio_biquad::{
    AudioBuffer, BiquadFilter, FilterError, FilterOptions, FilterType, Param, StreamContext,
    StreamFormat, WhiteNoise,
};
use common::{
    ExampleAudioState, KeyAction, device_format, is_quit_key, run_interactive_example,
};
use crossterm::{
    ExecutableCommand,
    event::{KeyCode, KeyEvent},
};
use rand::SeedableRng;
use std::io::{Write, stdout};

const BASE_FREQUENCY: f64 = 1000.0;

fn settings(filter_type: FilterType) -> FilterOptions {
    let (q, gain) = match filter_type {
        FilterType::LowPass | FilterType::HighPass => (12.0, 0.0),
        FilterType::LowShelf | FilterType::HighShelf => (1.0, 12.0),
        FilterType::Peaking => (4.0, 18.0),
        FilterType::Notch | FilterType::AllPass => (2.0, 0.0),
        FilterType::BandPass => (20.0, 0.0),
    };
    FilterOptions {
        filter_type,
        frequency: BASE_FREQUENCY,
        q,
        gain,
        ..Default::default()
    }
}

fn sweep() -> Param {
    Param::time_varying(|t| BASE_FREQUENCY * 4.0_f64.powf((t * 0.5).sin()))
}

struct AudioState {
    noise: WhiteNoise<rand::rngs::StdRng>,
    filter: BiquadFilter,
    context: StreamContext,
    type_index: usize,
    detune: f64,
    sweeping: bool,
}

impl AudioState {
    fn new(format: StreamFormat) -> Result<Self> {
        Ok(Self {
            noise: WhiteNoise::with_rng(rand::rngs::StdRng::from_entropy()),
            filter: BiquadFilter::new(settings(FilterType::ALL[0]), format)?,
            context: StreamContext::new(format),
            type_index: 0,
            detune: 0.0,
            sweeping: false,
        })
    }

    fn next_type(&mut self) {
        self.type_index = (self.type_index + 1) % FilterType::ALL.len();
        let options = settings(FilterType::ALL[self.type_index]);
        self.filter.set_type(options.filter_type);
        self.filter.set_q(options.q);
        self.filter.set_gain(options.gain);
    }

    fn shift(&mut self, cents: f64) {
        self.detune = (self.detune + cents).clamp(-3600.0, 3600.0);
        self.filter.set_detune(self.detune);
    }

    fn toggle_sweep(&mut self) {
        self.sweeping = !self.sweeping;
        if self.sweeping {
            self.filter.set_frequency(sweep());
        } else {
            self.filter.set_frequency(BASE_FREQUENCY);
        }
    }

    fn describe(&self) -> String {
        let c = self.filter.coefficients();
        format!(
            "{:<9} detune {:+5} cents{} | b0={:+.4} b1={:+.4} b2={:+.4} a1={:+.4} a2={:+.4}",
            self.filter.filter_type(),
            self.detune,
            if self.sweeping { " (sweep)" } else { "" },
            c.b0,
            c.b1,
            c.b2,
            c.a1,
            c.a2
        )
    }
}

impl ExampleAudioState for AudioState {
    fn render(&mut self, block: &mut AudioBuffer) -> Result<(), FilterError> {
        // Mono noise in, every channel filtered with its own state
        block.fill_from(&mut self.noise);
        for ch in 0..block.channels() {
            if let Some(samples) = block.channel_mut(ch) {
                samples.iter_mut().for_each(|s| *s *= 0.2);
            }
        }
        self.filter.process(block, &self.context)?;
        self.context.advance(block.frames());
        Ok(())
    }
}

fn draw_ui(line: &str) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;
    write!(
        stdout,
        "SPACE=type UP/DOWN=detune S=sweep Q=quit\r\n{}",
        line
    )?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let format = device_format()?;

    run_interactive_example(
        AudioState::new(format)?,
        |state| draw_ui(&state.lock().unwrap().describe()),
        |state, key_event: &KeyEvent| {
            let mut s = state.lock().unwrap();
            match key_event.code {
                KeyCode::Char(' ') => s.next_type(),
                KeyCode::Up => s.shift(100.0),
                KeyCode::Down => s.shift(-100.0),
                KeyCode::Char('s') | KeyCode::Char('S') => s.toggle_sweep(),
                code if is_quit_key(code) => return Ok(KeyAction::Exit),
                _ => return Ok(KeyAction::Continue),
            }
            // Coefficients shown are the ones the next block will use
            let elapsed = s.context.elapsed();
            s.filter.update(elapsed)?;
            let line = s.describe();
            drop(s);
            draw_ui(&line)?;
            Ok(KeyAction::Continue)
        },
    )
}
