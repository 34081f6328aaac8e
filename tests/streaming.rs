#![cfg(feature = "noise")]

use audio_biquad::{
    AudioBuffer, BiquadFilter, Coefficients, FilterOptions, FilterType, Impulse, Param, Signal,
    SineOscillator, Stream, StreamContext, StreamFormat, WhiteNoise, design,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SAMPLE_RATE: f64 = 44100.0;

fn format(channels: usize) -> StreamFormat {
    StreamFormat::new(SAMPLE_RATE, channels).unwrap()
}

fn noise(seed: u64, len: usize) -> Vec<f64> {
    let mut source = WhiteNoise::with_rng(StdRng::seed_from_u64(seed));
    let mut samples = vec![0.0; len];
    source.process(&mut samples);
    samples
}

fn assert_close(got: &[f64], expected: &[f64]) {
    assert_eq!(got.len(), expected.len());
    for (i, (g, e)) in got.iter().zip(expected).enumerate() {
        assert!((g - e).abs() < 1e-12, "sample {i}: got {g}, expected {e}");
    }
}

#[test]
fn test_golden_lowpass_impulse_response() {
    let mut filter = BiquadFilter::lowpass(format(1), 1000.0, 0.0).unwrap();
    let mut block = AudioBuffer::new(1, 5);
    block.fill_from(&mut Impulse::new());

    filter
        .process(&mut block, &StreamContext::new(format(1)))
        .unwrap();

    assert_close(
        block.channel(0).unwrap(),
        &[
            0.004603998475022464,
            0.01749103407573073,
            0.03230822922034822,
            0.043826481882200785,
            0.052435688075579745,
        ],
    );

    // Same values straight from the recurrence on the designer's output
    let Coefficients { b0, b1, b2, a1, a2 } =
        design(FilterType::LowPass, 1000.0 / (0.5 * SAMPLE_RATE), 0.0, 0.0);
    let h1 = b1 - a1 * b0;
    let h2 = b2 - a1 * h1 - a2 * b0;
    assert_close(&block.channel(0).unwrap()[..3], &[b0, h1, h2]);
}

#[test]
fn test_split_blocks_match_single_block() {
    let input = noise(1, 1000);

    for kind in FilterType::ALL {
        let options = FilterOptions {
            filter_type: kind,
            frequency: 2500.0,
            q: 3.0,
            gain: 6.0,
            ..Default::default()
        };

        let mut whole = BiquadFilter::new(options, format(1)).unwrap();
        let mut expected = AudioBuffer::from_channels(vec![input.clone()]).unwrap();
        whole
            .process(&mut expected, &StreamContext::new(format(1)))
            .unwrap();

        let mut split = BiquadFilter::new(options, format(1)).unwrap();
        let mut ctx = StreamContext::new(format(1));
        let mut output = Vec::new();
        for chunk in [&input[..1], &input[1..333], &input[333..334], &input[334..]] {
            let mut block = AudioBuffer::from_channels(vec![chunk.to_vec()]).unwrap();
            split.process(&mut block, &ctx).unwrap();
            ctx.advance(block.frames());
            output.extend_from_slice(block.channel(0).unwrap());
        }

        assert_close(&output, expected.channel(0).unwrap());
    }
}

#[test]
fn test_channels_are_independent() {
    let left = noise(2, 512);
    let mut sine = SineOscillator::new(300.0, SAMPLE_RATE);
    let mut right = vec![0.0; 512];
    sine.process(&mut right);

    let mut stereo = BiquadFilter::bandpass(format(2), 800.0, 4.0).unwrap();
    let mut block = AudioBuffer::from_channels(vec![left.clone(), right.clone()]).unwrap();
    stereo
        .process(&mut block, &StreamContext::new(format(2)))
        .unwrap();

    for (ch, input) in [left, right].into_iter().enumerate() {
        let mut mono = BiquadFilter::bandpass(format(1), 800.0, 4.0).unwrap();
        let mut alone = AudioBuffer::from_channels(vec![input]).unwrap();
        mono.process(&mut alone, &StreamContext::new(format(1)))
            .unwrap();
        assert_eq!(block.channel(ch).unwrap(), alone.channel(0).unwrap());
    }
}

#[test]
fn test_allpass_zero_q_negates_any_input() {
    let input = noise(3, 256);
    let mut filter = BiquadFilter::allpass(format(1), 440.0, 0.0).unwrap();
    assert_eq!(filter.coefficients(), Coefficients::gain(-1.0));

    let mut ctx = StreamContext::new(format(1));
    for chunk in input.chunks(100) {
        let mut block = AudioBuffer::from_channels(vec![chunk.to_vec()]).unwrap();
        filter.process(&mut block, &ctx).unwrap();
        ctx.advance(block.frames());

        let negated: Vec<f64> = chunk.iter().map(|s| -s).collect();
        assert_eq!(block.channel(0).unwrap(), negated.as_slice());
    }
}

#[test]
fn test_stream_drives_time_varying_parameters() {
    let fmt = format(1);
    // Cutoff sweeps linearly with time; the stream supplies the clock
    let sweep = |t: f64| 200.0 + 10000.0 * t;
    let filter = BiquadFilter::lowpass(fmt, 200.0, 0.0)
        .unwrap()
        .with_frequency(Param::time_varying(sweep));
    let mut stream = Stream::new(fmt).with(filter);

    let mut reference = BiquadFilter::lowpass(fmt, 200.0, 0.0).unwrap();
    let mut ctx = StreamContext::new(format(1));

    let input = noise(4, 4410);
    for chunk in input.chunks(441) {
        let mut block = AudioBuffer::from_channels(vec![chunk.to_vec()]).unwrap();
        stream.process_block(&mut block).unwrap();

        // Hand-driven equivalent: fixed frequency set to the sweep value at block start
        let mut expected = AudioBuffer::from_channels(vec![chunk.to_vec()]).unwrap();
        reference.set_frequency(sweep(ctx.elapsed()));
        reference.process(&mut expected, &ctx).unwrap();
        ctx.advance(expected.frames());

        assert_eq!(block, expected);
    }

    assert_eq!(stream.context().frames_processed(), 4410);
}

#[test]
fn test_stream_chains_filters() {
    let fmt = format(1);
    let mut stream = Stream::new(fmt)
        .with(BiquadFilter::allpass(fmt, 1000.0, 0.0).unwrap())
        .with(BiquadFilter::allpass(fmt, 1000.0, 0.0).unwrap());

    let input = noise(5, 128);
    let mut block = AudioBuffer::from_channels(vec![input.clone()]).unwrap();
    stream.process_block(&mut block).unwrap();

    // Two sign flips cancel
    assert_eq!(block.channel(0).unwrap(), input.as_slice());
}

#[test]
fn test_bandpass_on_noise_stays_bounded() {
    // A very narrow band-pass over noise
    let fmt = format(2);
    let options = FilterOptions {
        filter_type: FilterType::BandPass,
        q: 1000.0,
        frequency: 440.0,
        gain: 100.0,
        ..Default::default()
    };
    let mut stream = Stream::new(fmt).with(BiquadFilter::new(options, fmt).unwrap());
    let mut source = WhiteNoise::with_rng(StdRng::seed_from_u64(6));

    for _ in 0..200 {
        let mut block = AudioBuffer::new(2, 441);
        block.fill_from(&mut source);
        stream.process_block(&mut block).unwrap();
        for ch in 0..2 {
            assert!(block.channel(ch).unwrap().iter().all(|s| s.abs() < 1.0));
        }
    }
}

#[test]
fn test_interleaved_round_trip_through_filter() {
    let fmt = format(2);
    let mut filter = BiquadFilter::highshelf(fmt, 4000.0, 0.0).unwrap();

    // A 0 dB shelf is transparent
    let interleaved = noise(7, 200);
    let mut block = AudioBuffer::from_interleaved(&interleaved, 2).unwrap();
    filter.process(&mut block, &StreamContext::new(fmt)).unwrap();

    assert_close(&block.to_interleaved(), &interleaved);
}
