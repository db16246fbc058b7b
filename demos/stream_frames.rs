//! Streams a synthetic tone through a frame generator and prints each frame's RMS.
//! Run with `RUST_LOG=debug cargo run --example stream_frames` to see the
//! setup diagnostics and hop-size corrections.

use std::error::Error;

use framegen::{FrameConfig, FrameGenerator};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let sample_rate = 8_000.0f32;
    let chunk = 100;
    // 250 is not a multiple of the chunk size and is rounded up to 300.
    let mut frames = FrameGenerator::with_config(FrameConfig::new(512, 250));
    frames.setup_with(chunk, sample_rate)?;
    if let Some(layout) = frames.layout() {
        println!(
            "frame {} / hop {} (requested {}) / {:.2} frames per second",
            layout.frame_size(),
            layout.hop_size(),
            layout.requested_hop_size(),
            layout.frame_rate()
        );
    }

    let signal: Vec<f32> = (0..sample_rate as usize / 4)
        .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate).sin())
        .collect();

    let mut index = 0;
    let count = frames.frames(&signal, |frame| {
        let rms = (frame.iter().map(|x| x * x).sum::<f32>() / frame.len() as f32).sqrt();
        println!("frame {:3}: rms {:.4}", index, rms);
        index += 1;
    })?;
    println!("{} frames from {} samples", count, signal.len());
    Ok(())
}
