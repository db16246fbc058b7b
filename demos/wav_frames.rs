//! Splits a WAV file into analysis frames and reports per-frame peak levels.
//!
//! Usage:
//! ```bash
//! cargo run --example wav_frames -- <INPUT_WAV> [FRAME_SIZE] [HOP_SIZE] [CHUNK_SIZE]
//! ```
//!
//! Only the first channel of the file is framed. Integer formats are scaled to
//! [-1, 1].

use std::env;
use std::error::Error;
use std::io;

use framegen::{FrameConfig, FrameGenerator, SignalBank};
use hound::{SampleFormat, WavReader};

fn parse_arg(arg: Option<String>, default: usize) -> Result<usize, Box<dyn Error>> {
    match arg {
        Some(v) => Ok(v.parse()?),
        None => Ok(default),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input = args.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "usage: wav_frames <INPUT_WAV> [FRAME_SIZE] [HOP_SIZE] [CHUNK_SIZE]",
        )
    })?;
    let frame_size = parse_arg(args.next(), 2048)?;
    let hop_size = parse_arg(args.next(), 512)?;
    let chunk_size = parse_arg(args.next(), 256)?;

    let mut reader = WavReader::open(&input)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };
    let mono: Vec<f32> = interleaved.iter().step_by(channels).copied().collect();

    let mut frames = FrameGenerator::with_config(FrameConfig::new(frame_size, hop_size));
    let mut chunk = SignalBank::new();
    chunk.initialize(1, chunk_size, spec.sample_rate as f32)?;
    frames.setup(&chunk)?;

    let mut count = 0usize;
    for block in mono.chunks(chunk_size) {
        if frames.process_samples(block)? {
            let peak = frames.frame().iter().fold(0.0f32, |m, x| m.max(x.abs()));
            println!("frame {:5}: peak {:.4}", count, peak);
            count += 1;
        }
    }
    println!(
        "{}: {} frames at {:.2} frames per second",
        input,
        count,
        frames.output().frame_rate()
    );
    Ok(())
}
