//! Streaming frame generator.
//!
//! [`FrameGenerator`] turns a stream of input chunks into fixed-length,
//! possibly overlapping frames. Each call to [`FrameGenerator::process`]
//! runs the same four steps:
//!
//! 1. **shift**: if the previous call completed a frame, the trailing
//!    `overlap` samples are moved to the front and writing resumes after them;
//! 2. **flush**: samples stashed by the previous call are appended;
//! 3. **fill**: the new chunk is copied in until it is exhausted or the frame
//!    is full;
//! 4. **stash**: whatever did not fit is kept for the next call, and the
//!    output trigger is set iff the frame is full.
//!
//! All storage is allocated by [`FrameGenerator::setup`]; processing and
//! resetting never allocate.
//!
//! # Example
//! ```
//! use framegen::{FrameGenerator, SignalBank};
//!
//! let mut frames = FrameGenerator::new(4, 2);
//! // One sample per call at 8 kHz.
//! frames.setup(&SignalBank::from_mono(&[0.0], 8000.0).unwrap()).unwrap();
//! assert_eq!(frames.write_index(), 2);
//!
//! assert!(!frames.process_samples(&[1.0]).unwrap());
//! assert!(frames.process_samples(&[2.0]).unwrap());
//! assert_eq!(frames.frame(), &[0.0, 0.0, 1.0, 2.0]);
//!
//! assert!(!frames.process_samples(&[3.0]).unwrap());
//! assert!(frames.process_samples(&[4.0]).unwrap());
//! assert_eq!(frames.frame(), &[1.0, 2.0, 3.0, 4.0]);
//! ```

use alloc::boxed::Box;
use alloc::vec;

use log::debug;

use crate::config::{Alignment, FrameConfig, FrameLayout};
use crate::error::FrameError;
use crate::module::Module;
use crate::signal::SignalBank;

const NAME: &str = "FrameGenerator";

/// Sliding-window framer over a single-channel sample stream.
#[derive(Debug, Clone, Default)]
pub struct FrameGenerator {
    config: FrameConfig,
    layout: Option<FrameLayout>,
    output: SignalBank,
    stash: Box<[f32]>,
    write_index: usize,
    remaining_samples: usize,
}

impl FrameGenerator {
    /// Generator for frames of `frame_size` samples started every
    /// `hop_size` samples, centre aligned.
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        Self::with_config(FrameConfig::new(frame_size, hop_size))
    }

    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Validate the pending configuration against the chunk size and sample
    /// rate described by `input`, then allocate the frame and stash buffers.
    ///
    /// `input.n_samples()` is taken as the size of every chunk that will be
    /// passed to [`FrameGenerator::process`]. On error the generator is left
    /// unconfigured and `process` reports [`FrameError::NotInitialized`].
    pub fn setup(&mut self, input: &SignalBank) -> Result<(), FrameError> {
        self.setup_with(input.n_samples(), input.fs())
    }

    /// [`FrameGenerator::setup`] without an input descriptor.
    pub fn setup_with(&mut self, chunk_size: usize, sample_rate: f32) -> Result<(), FrameError> {
        self.layout = None;
        self.output = SignalBank::new();
        self.stash = Box::default();
        self.write_index = 0;
        self.remaining_samples = 0;

        let layout = self.config.resolve(chunk_size, sample_rate)?;
        self.output
            .initialize(1, layout.frame_size(), layout.sample_rate())?;
        self.output.set_frame_rate(layout.frame_rate());
        self.output.set_trig(false);
        self.stash = vec![0.0; layout.audio_buffer_size()].into_boxed_slice();
        self.write_index = layout.start_index();
        debug!(
            "{}: {} process calls per frame once running",
            NAME,
            layout.hop_size() / layout.input_chunk_size()
        );
        self.layout = Some(layout);
        Ok(())
    }

    /// Consume one chunk held in channel 0 of `input`.
    ///
    /// Returns the output trigger: `true` iff this call completed a frame.
    pub fn process(&mut self, input: &SignalBank) -> Result<bool, FrameError> {
        if self.layout.is_none() {
            return Err(FrameError::NotInitialized);
        }
        if input.n_channels() == 0 {
            return Err(FrameError::MissingChannel);
        }
        self.process_samples(input.channel(0))
    }

    /// Consume one chunk of samples.
    ///
    /// The chunk may be shorter than the chunk size given at setup but not
    /// longer; an oversized chunk is rejected before any state changes.
    pub fn process_samples(&mut self, input: &[f32]) -> Result<bool, FrameError> {
        let layout = self.layout.ok_or(FrameError::NotInitialized)?;
        if input.len() > layout.input_chunk_size() {
            return Err(FrameError::ChunkTooLarge {
                len: input.len(),
                chunk_size: layout.input_chunk_size(),
            });
        }
        let frame_size = layout.frame_size();
        let frame = self.output.channel_mut(0);

        if self.write_index == frame_size {
            frame.copy_within(layout.hop_size()..frame_size, 0);
            self.write_index = layout.overlap();
        }

        if self.remaining_samples > 0 {
            let end = self.write_index + self.remaining_samples;
            frame[self.write_index..end].copy_from_slice(&self.stash[..self.remaining_samples]);
            self.write_index = end;
            self.remaining_samples = 0;
        }

        let consumed = input.len().min(frame_size - self.write_index);
        frame[self.write_index..self.write_index + consumed].copy_from_slice(&input[..consumed]);
        self.write_index += consumed;

        let leftover = &input[consumed..];
        self.stash[..leftover.len()].copy_from_slice(leftover);
        self.remaining_samples = leftover.len();

        let ready = self.write_index == frame_size;
        self.output.set_trig(ready);
        Ok(ready)
    }

    /// Feed a whole in-memory `stream` through the generator in chunks of
    /// the configured size (the last one may be short), calling `on_frame`
    /// with every completed frame. Returns the number of frames produced.
    pub fn frames<F>(&mut self, stream: &[f32], mut on_frame: F) -> Result<usize, FrameError>
    where
        F: FnMut(&[f32]),
    {
        let layout = self.layout.ok_or(FrameError::NotInitialized)?;
        let mut count = 0;
        for chunk in stream.chunks(layout.input_chunk_size()) {
            if self.process_samples(chunk)? {
                on_frame(self.frame());
                count += 1;
            }
        }
        Ok(count)
    }

    /// Return to the state right after setup: write index at the alignment
    /// offset, nothing stashed, buffers zeroed, trigger cleared.
    ///
    /// Storage and the corrected layout are kept. Does nothing before setup.
    pub fn reset(&mut self) {
        if let Some(layout) = self.layout {
            self.output.clear();
            self.output.set_trig(false);
            self.stash.iter_mut().for_each(|s| *s = 0.0);
            self.write_index = layout.start_index();
            self.remaining_samples = 0;
        }
    }

    /// Requested frame size; changes apply at the next setup.
    pub fn frame_size(&self) -> usize {
        self.config.frame_size
    }

    pub fn set_frame_size(&mut self, frame_size: usize) {
        self.config.frame_size = frame_size;
    }

    /// Requested hop size; the corrected value is in [`FrameGenerator::layout`].
    pub fn hop_size(&self) -> usize {
        self.config.hop_size
    }

    pub fn set_hop_size(&mut self, hop_size: usize) {
        self.config.hop_size = hop_size;
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.config.alignment = alignment;
    }

    /// Capacity of the stash buffer, zero before setup.
    pub fn stash_buffer_size(&self) -> usize {
        self.stash.len()
    }

    /// Pending configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Active configuration, present after a successful setup.
    pub fn layout(&self) -> Option<&FrameLayout> {
        self.layout.as_ref()
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    pub fn remaining_samples(&self) -> usize {
        self.remaining_samples
    }

    pub fn output(&self) -> &SignalBank {
        &self.output
    }

    /// Current contents of the frame buffer, empty before setup.
    pub fn frame(&self) -> &[f32] {
        if self.layout.is_some() {
            self.output.channel(0)
        } else {
            &[]
        }
    }

    pub fn is_frame_ready(&self) -> bool {
        self.output.trig()
    }

    pub fn is_initialized(&self) -> bool {
        self.layout.is_some()
    }
}

impl Module for FrameGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initialize(&mut self, input: &SignalBank) -> Result<(), FrameError> {
        self.setup(input)
    }

    fn process(&mut self, input: &SignalBank) -> Result<(), FrameError> {
        FrameGenerator::process(self, input).map(|_| ())
    }

    fn reset(&mut self) {
        FrameGenerator::reset(self)
    }

    fn output(&self) -> &SignalBank {
        &self.output
    }

    fn is_initialized(&self) -> bool {
        self.layout.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn generator(frame_size: usize, hop_size: usize, chunk: usize) -> FrameGenerator {
        let mut fg = FrameGenerator::new(frame_size, hop_size);
        fg.setup_with(chunk, 1000.0).unwrap();
        fg
    }

    #[test]
    fn setup_initialises_output_metadata() {
        let fg = generator(8, 4, 2);
        let out = fg.output();
        assert_eq!(out.n_channels(), 1);
        assert_eq!(out.n_samples(), 8);
        assert_eq!(out.frame_rate(), 250.0);
        assert!(!out.trig());
        assert_eq!(fg.stash_buffer_size(), 8);
        assert_eq!(fg.write_index(), 4);
    }

    #[test]
    fn one_sample_per_call_scenario() {
        let mut fg = generator(4, 2, 1);
        assert_eq!(fg.write_index(), 2);
        assert!(!fg.process_samples(&[1.0]).unwrap());
        assert_eq!(fg.write_index(), 3);
        assert!(fg.process_samples(&[2.0]).unwrap());
        assert_eq!(fg.frame(), &[0.0, 0.0, 1.0, 2.0]);
        assert!(!fg.process_samples(&[3.0]).unwrap());
        assert_eq!(fg.write_index(), 3);
        assert_eq!(&fg.frame()[..3], &[1.0, 2.0, 3.0]);
        assert!(fg.process_samples(&[4.0]).unwrap());
        assert_eq!(fg.frame(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn leftover_is_stashed_and_flushed() {
        // Centre offset 2, chunks of 2 against a frame of 5.
        let mut fg = generator(5, 2, 2);
        assert!(!fg.process_samples(&[1.0, 2.0]).unwrap());
        assert!(fg.process_samples(&[3.0, 4.0]).unwrap());
        assert_eq!(fg.frame(), &[0.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(fg.remaining_samples(), 1);

        // Overlap of 3 carries [1, 2, 3] into the next frame.
        assert!(fg.process_samples(&[5.0, 6.0]).unwrap());
        assert_eq!(fg.frame(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(fg.remaining_samples(), 1);
        assert_eq!(fg.output().frame_rate(), 500.0);
    }

    #[test]
    fn left_alignment_starts_at_zero() {
        let mut fg = FrameGenerator::with_config(
            FrameConfig::new(4, 4).with_alignment(Alignment::Left),
        );
        fg.setup_with(2, 100.0).unwrap();
        assert_eq!(fg.write_index(), 0);
        assert!(!fg.process_samples(&[1.0, 2.0]).unwrap());
        assert!(fg.process_samples(&[3.0, 4.0]).unwrap());
        assert_eq!(fg.frame(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(!fg.process_samples(&[5.0, 6.0]).unwrap());
        assert_eq!(fg.write_index(), 2);
    }

    #[test]
    fn short_chunks_are_accepted() {
        let mut fg = generator(4, 2, 3);
        assert_eq!(fg.layout().unwrap().hop_size(), 3);
        assert!(!fg.process_samples(&[]).unwrap());
        assert!(!fg.process_samples(&[1.0]).unwrap());
        assert!(fg.process_samples(&[2.0]).unwrap());
        assert_eq!(fg.frame(), &[0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn oversized_chunk_is_rejected_without_side_effects() {
        let mut fg = generator(4, 2, 2);
        let before = fg.write_index();
        assert_eq!(
            fg.process_samples(&[1.0, 2.0, 3.0]),
            Err(FrameError::ChunkTooLarge {
                len: 3,
                chunk_size: 2
            })
        );
        assert_eq!(fg.write_index(), before);
        assert_eq!(fg.remaining_samples(), 0);
    }

    #[test]
    fn process_before_setup_fails() {
        let mut fg = FrameGenerator::new(4, 2);
        assert_eq!(
            fg.process_samples(&[1.0]),
            Err(FrameError::NotInitialized)
        );
        assert!(fg.frame().is_empty());
        assert_eq!(fg.stash_buffer_size(), 0);
    }

    #[test]
    fn failed_setup_leaves_generator_unusable() {
        let mut fg = generator(4, 2, 1);
        fg.set_hop_size(5);
        assert!(fg.setup_with(1, 1000.0).is_err());
        assert!(!fg.is_initialized());
        assert_eq!(
            fg.process_samples(&[1.0]),
            Err(FrameError::NotInitialized)
        );
    }

    #[test]
    fn setters_apply_on_next_setup() {
        let mut fg = generator(4, 2, 1);
        fg.set_frame_size(8);
        fg.set_hop_size(3);
        assert_eq!(fg.frame_size(), 8);
        assert_eq!(fg.hop_size(), 3);
        assert_eq!(fg.layout().unwrap().frame_size(), 4);
        assert_eq!(fg.frame().len(), 4);

        fg.setup_with(2, 1000.0).unwrap();
        let layout = fg.layout().unwrap();
        assert_eq!(layout.frame_size(), 8);
        assert_eq!(layout.hop_size(), 4);
        assert_eq!(fg.hop_size(), 3);
        assert_eq!(fg.frame().len(), 8);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut fg = generator(4, 2, 2);
        fg.process_samples(&[1.0, 2.0]).unwrap();
        fg.process_samples(&[3.0, 4.0]).unwrap();
        assert!(fg.is_frame_ready());
        fg.reset();
        assert!(!fg.is_frame_ready());
        assert_eq!(fg.write_index(), 2);
        assert_eq!(fg.remaining_samples(), 0);
        assert_eq!(fg.stash_buffer_size(), 4);

        assert!(fg.process_samples(&[5.0, 6.0]).unwrap());
        assert_eq!(fg.frame(), &[0.0, 0.0, 5.0, 6.0]);
    }

    #[test]
    fn frames_helper_emits_every_completed_frame() {
        let mut fg = generator(4, 2, 2);
        let stream: Vec<f32> = (1..=8).map(|i| i as f32).collect();
        let mut seen = Vec::new();
        let count = fg.frames(&stream, |f| seen.push(f.to_vec())).unwrap();
        assert_eq!(count, 4);
        assert_eq!(seen[0], [0.0, 0.0, 1.0, 2.0]);
        assert_eq!(seen[1], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(seen[3], [5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn module_trait_drives_generator() {
        let mut fg = FrameGenerator::new(2, 1);
        let module: &mut dyn Module = &mut fg;
        assert!(!module.is_initialized());
        let chunk = SignalBank::from_mono(&[0.5], 10.0).unwrap();
        module.initialize(&chunk).unwrap();
        assert_eq!(module.name(), "FrameGenerator");
        module.process(&chunk).unwrap();
        assert!(module.output().trig());
        assert_eq!(module.output().channel(0), &[0.0, 0.5]);
        module.reset();
        assert!(!module.output().trig());
    }

    #[test]
    fn empty_input_bank_is_rejected() {
        let mut fg = generator(4, 2, 1);
        assert_eq!(
            fg.process(&SignalBank::new()),
            Err(FrameError::MissingChannel)
        );
    }
}
