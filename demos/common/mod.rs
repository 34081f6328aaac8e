//! Common utilities for the demos: device output and the terminal event loop.

use anyhow::Result;
use audio_biquad::{AudioBuffer, FilterError, StreamFormat};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::panic;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Audio state that renders whole blocks.
///
/// The device callback hands over a planar block sized to the callback; the state
/// fills it (source + processing) and the result is interleaved to the device.
pub trait ExampleAudioState: Send + 'static {
    fn render(&mut self, block: &mut AudioBuffer) -> Result<(), FilterError>;
}

/// Key handling result that controls the event loop
pub enum KeyAction {
    /// Continue the event loop
    Continue,
    /// Exit the event loop
    Exit,
}

/// Runs an interactive audio example with terminal UI.
///
/// This function handles all the boilerplate:
/// - Audio device setup and stream creation
/// - Terminal raw mode and alternate screen
/// - Panic hook for terminal cleanup
/// - Event loop with key polling
///
/// # Arguments
///
/// * `state` - The audio state (must implement ExampleAudioState)
/// * `initial_ui` - Closure to draw the initial UI
/// * `key_handler` - Closure that handles key events and returns whether to continue or exit
///
/// # Example
///
/// ```no_run
/// struct MyAudioState { /* ... */ }
///
/// impl ExampleAudioState for MyAudioState {
///     fn render(&mut self, block: &mut AudioBuffer) -> Result<(), FilterError> { /* ... */ }
/// }
///
/// run_interactive_example(
///     MyAudioState::new(),
///     |state| { /* draw initial UI */ Ok(()) },
///     |state, key_event| {
///         match key_event.code {
///             KeyCode::Char('q') => KeyAction::Exit,
///             _ => KeyAction::Continue,
///         }
///     }
/// )
/// ```
pub fn run_interactive_example<S, F, K>(state: S, initial_ui: F, key_handler: K) -> Result<()>
where
    S: ExampleAudioState,
    F: FnOnce(&Arc<Mutex<S>>) -> Result<()>,
    K: Fn(&Arc<Mutex<S>>, &KeyEvent) -> Result<KeyAction>,
{
    let state = Arc::new(Mutex::new(state));
    let _stream = play(state.clone())?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    let result = initial_ui(&state).and_then(|()| event_loop(&state, key_handler));

    // Restore the terminal even when a handler failed
    cleanup_terminal();

    result
}

fn event_loop<S, K>(state: &Arc<Mutex<S>>, key_handler: K) -> Result<()>
where
    K: Fn(&Arc<Mutex<S>>, &KeyEvent) -> Result<KeyAction>,
{
    loop {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key_event) = event::read()?
        {
            match key_handler(state, &key_event)? {
                KeyAction::Continue => {}
                KeyAction::Exit => return Ok(()),
            }
        }
    }
}

fn default_device() -> Result<cpal::Device> {
    cpal::default_host()
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No output device available"))
}

/// Sample rate and channel count of the default output device.
pub fn device_format() -> Result<StreamFormat> {
    let config = default_device()?.default_output_config()?;
    Ok(StreamFormat::new(
        config.sample_rate().0 as f64,
        config.channels() as usize,
    )?)
}

/// Opens the default output device and starts playing `state`.
///
/// The returned stream must be kept alive for playback to continue.
pub fn play<S: ExampleAudioState>(state: Arc<Mutex<S>>) -> Result<cpal::Stream> {
    let device = default_device()?;
    let config = device.default_output_config()?;

    let stream = match config.sample_format() {
        SampleFormat::F32 => create_audio_stream::<f32, S>(&device, &config.into(), state)?,
        SampleFormat::I16 => create_audio_stream::<i16, S>(&device, &config.into(), state)?,
        SampleFormat::U16 => create_audio_stream::<u16, S>(&device, &config.into(), state)?,
        sample_format => {
            return Err(anyhow::anyhow!(
                "Unsupported sample format: {}",
                sample_format
            ));
        }
    };
    Ok(stream)
}

/// Creates an audio stream that renders blocks from the audio state.
fn create_audio_stream<T, S>(
    device: &cpal::Device,
    config: &StreamConfig,
    state: Arc<Mutex<S>>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f64> + cpal::SizedSample,
    S: ExampleAudioState,
{
    let channels = config.channels as usize;
    let mut block = AudioBuffer::new(channels, 0);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / channels;
            if block.frames() != frames {
                block = AudioBuffer::new(channels, frames);
            }

            let rendered = match state.lock() {
                Ok(mut state) => state.render(&mut block),
                Err(_) => return,
            };
            if let Err(err) = rendered {
                eprintln!("Render error: {}", err);
                data.iter_mut().for_each(|s| *s = T::EQUILIBRIUM);
                return;
            }

            for (i, frame) in data.chunks_mut(channels).enumerate() {
                for (ch, s) in frame.iter_mut().enumerate() {
                    let sample = block.channel(ch).map_or(0.0, |c| c[i]);
                    *s = T::from_sample(sample.clamp(-1.0, 1.0));
                }
            }
        },
        |err| eprintln!("Audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

/// Cleans up terminal state (cursor, alternate screen, raw mode).
fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
