//! Frame configuration and its validated, corrected form.
//!
//! [`FrameConfig`] holds the *requested* parameters and may be edited at any
//! time. [`FrameConfig::resolve`] checks them against the input chunk size
//! and produces a [`FrameLayout`], the *active* parameter set a
//! [`FrameGenerator`](crate::FrameGenerator) runs with.

use log::{debug, error, warn};

use crate::error::FrameError;

/// Where the first frame's content starts inside the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// First frame is filled from index 0.
    Left,
    /// First frame is filled from `ceil((frame_size - 1) / 2)`, leaving the
    /// leading positions zero so frames are centred on hop boundaries.
    #[default]
    Centered,
}

impl Alignment {
    /// Write index a fresh stream starts at for frames of `frame_size`.
    pub fn offset(self, frame_size: usize) -> usize {
        match self {
            Alignment::Left => 0,
            Alignment::Centered => frame_size.saturating_sub(1).div_ceil(2),
        }
    }
}

/// How the requested hop size was adjusted to fit the input chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopCorrection {
    /// The hop was smaller than one chunk and was raised to the chunk size.
    RaisedToChunk,
    /// The hop was rounded up to the next whole number of chunks.
    RoundedToChunkMultiple,
}

/// Requested framing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Frame length in samples (default: 1024).
    pub frame_size: usize,
    /// Requested distance between frame starts in samples (default: 512).
    pub hop_size: usize,
    /// Placement of the first frame (default: centred).
    pub alignment: Alignment,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_size: 1024,
            hop_size: 512,
            alignment: Alignment::Centered,
        }
    }
}

impl FrameConfig {
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        Self {
            frame_size,
            hop_size,
            ..Self::default()
        }
    }

    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = hop_size;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Validate the request against `chunk_size` input samples per call at
    /// `sample_rate` Hz and derive the active layout.
    ///
    /// The hop is raised to at least one chunk and rounded up to a whole
    /// number of chunks; both corrections are logged as warnings and recorded
    /// in [`FrameLayout::correction`].
    ///
    /// # Errors
    ///
    /// - [`FrameError::InvalidFrameSize`] if `frame_size` is zero,
    /// - [`FrameError::HopExceedsFrame`] if the requested hop is larger than
    ///   the frame,
    /// - [`FrameError::InvalidChunkSize`] if `chunk_size` is zero,
    /// - [`FrameError::InvalidSampleRate`] if `sample_rate` is not a positive
    ///   finite number,
    /// - [`FrameError::CorrectedHopExceedsFrame`] if the corrected hop no
    ///   longer fits in the frame.
    pub fn resolve(&self, chunk_size: usize, sample_rate: f32) -> Result<FrameLayout, FrameError> {
        let frame_size = self.frame_size;
        if frame_size == 0 {
            error!("frame size must be at least 1");
            return Err(FrameError::InvalidFrameSize);
        }
        if self.hop_size > frame_size {
            error!(
                "hop size {} cannot be greater than frame size {}",
                self.hop_size, frame_size
            );
            return Err(FrameError::HopExceedsFrame {
                hop_size: self.hop_size,
                frame_size,
            });
        }
        if chunk_size == 0 {
            error!("input chunk size must be at least 1");
            return Err(FrameError::InvalidChunkSize);
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            error!("sample rate {} is not a positive finite number", sample_rate);
            return Err(FrameError::InvalidSampleRate);
        }
        debug!("input chunk size in samples: {}", chunk_size);

        let correction = if chunk_size > self.hop_size {
            warn!(
                "hop size {} is less than the input chunk size {}, automatically correcting",
                self.hop_size, chunk_size
            );
            Some(HopCorrection::RaisedToChunk)
        } else if self.hop_size % chunk_size != 0 {
            warn!(
                "hop size {} is not a multiple of the input chunk size {}, automatically correcting",
                self.hop_size, chunk_size
            );
            Some(HopCorrection::RoundedToChunkMultiple)
        } else {
            None
        };
        let hop_size = round_up_to_multiple(self.hop_size.max(chunk_size), chunk_size);
        if hop_size > frame_size {
            error!(
                "hop size corrected to {} exceeds frame size {}",
                hop_size, frame_size
            );
            return Err(FrameError::CorrectedHopExceedsFrame {
                corrected_hop: hop_size,
                frame_size,
            });
        }

        let audio_buffer_size = round_up_to_multiple(frame_size, chunk_size);
        let start_index = self.alignment.offset(frame_size);
        debug!("hop size in samples: {}", hop_size);
        debug!("frame size in samples: {}", frame_size);
        debug!("stash buffer size in samples: {}", audio_buffer_size);
        debug!("first frame starts at index {}", start_index);

        Ok(FrameLayout {
            frame_size,
            hop_size,
            requested_hop_size: self.hop_size,
            input_chunk_size: chunk_size,
            overlap: frame_size - hop_size,
            audio_buffer_size,
            start_index,
            alignment: self.alignment,
            sample_rate,
            correction,
        })
    }
}

/// Smallest multiple of `step` that is at least `value`.
fn round_up_to_multiple(value: usize, step: usize) -> usize {
    value.div_ceil(step) * step
}

/// Validated parameter set produced by [`FrameConfig::resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    frame_size: usize,
    hop_size: usize,
    requested_hop_size: usize,
    input_chunk_size: usize,
    overlap: usize,
    audio_buffer_size: usize,
    start_index: usize,
    alignment: Alignment,
    sample_rate: f32,
    correction: Option<HopCorrection>,
}

impl FrameLayout {
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Corrected hop: a whole number of chunks, at least one chunk.
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Hop as it was requested before correction.
    pub fn requested_hop_size(&self) -> usize {
        self.requested_hop_size
    }

    pub fn input_chunk_size(&self) -> usize {
        self.input_chunk_size
    }

    /// Samples shared by consecutive frames.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Capacity of the stash holding samples that overflow a full frame.
    pub fn audio_buffer_size(&self) -> usize {
        self.audio_buffer_size
    }

    /// Write index of a freshly set up or reset stream.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Frames emitted per second once the stream is running.
    pub fn frame_rate(&self) -> f32 {
        self.sample_rate / self.hop_size as f32
    }

    pub fn correction(&self) -> Option<HopCorrection> {
        self.correction
    }
}
