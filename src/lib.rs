//! # framegen - streaming analysis frames for block-based DSP
//!
//! Converts a continuous sample stream, delivered in chunks of any size, into
//! fixed-length, possibly overlapping frames ready for windowed transforms,
//! loudness models and other frame-based analysis.
//!
//! ## Features
//!
//! - **Allocation-free processing**: buffers are sized once at setup
//! - **Any chunk size**: samples that overflow a full frame are carried over
//! - **Centre or left alignment** of the first frame
//! - **Synchronous trigger** on the output when a frame is complete
//! - **no_std** with `alloc`
//!
//! ## Cargo Features
//!
//! - `std` (default): implement `std::error::Error` for the error types
//!
//! ## Logging
//!
//! Setup diagnostics and hop-size corrections are emitted through the
//! [`log`](https://docs.rs/log) facade. Install any logger, e.g.
//! `env_logger`, to see them. Processing never logs.
//!
//! ## Examples
//!
//! ```
//! use framegen::{FrameConfig, FrameGenerator};
//!
//! let mut frames = FrameGenerator::with_config(FrameConfig::new(1024, 512));
//! // 256 samples per call at 44.1 kHz.
//! frames.setup_with(256, 44_100.0)?;
//! let chunk = [0.0f32; 256];
//! let mut ready = 0;
//! for _ in 0..8 {
//!     if frames.process_samples(&chunk)? {
//!         ready += 1;
//!     }
//! }
//! assert_eq!(ready, 4);
//! # Ok::<(), framegen::FrameError>(())
//! ```
//!
//! Run the demos with:
//! ```bash
//! cargo run --example stream_frames
//! cargo run --example wav_frames -- input.wav
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license (https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Requested and validated framing parameters.
pub mod config;
/// Error types.
pub mod error;
/// The sliding-window frame generator.
pub mod generator;
/// The processing-stage contract.
pub mod module;
/// Multi-channel sample container.
pub mod signal;

pub use config::{Alignment, FrameConfig, FrameLayout, HopCorrection};
pub use error::{FrameError, SignalBankError};
pub use generator::FrameGenerator;
pub use module::Module;
pub use signal::SignalBank;
