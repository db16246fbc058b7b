//! Error types shared by the frame generator and its configuration.

use core::fmt;

/// Errors reported while configuring or driving a [`FrameGenerator`](crate::FrameGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The frame size was zero.
    InvalidFrameSize,
    /// The input chunk size was zero.
    InvalidChunkSize,
    /// The sample rate was non-positive or non-finite.
    InvalidSampleRate,
    /// The requested hop size is larger than the frame size.
    HopExceedsFrame { hop_size: usize, frame_size: usize },
    /// Rounding the hop up to a whole number of input chunks pushed it past
    /// the frame size, which would leave a negative overlap.
    CorrectedHopExceedsFrame {
        corrected_hop: usize,
        frame_size: usize,
    },
    /// `process` was called before a successful `setup`.
    NotInitialized,
    /// A chunk longer than the input chunk size given at setup.
    ChunkTooLarge { len: usize, chunk_size: usize },
    /// The input bank carries no channels to read from.
    MissingChannel,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::InvalidFrameSize => write!(f, "frame size must be at least 1"),
            FrameError::InvalidChunkSize => write!(f, "input chunk size must be at least 1"),
            FrameError::InvalidSampleRate => {
                write!(f, "sample rate must be finite and positive")
            }
            FrameError::HopExceedsFrame {
                hop_size,
                frame_size,
            } => write!(
                f,
                "hop size {} cannot be greater than frame size {}",
                hop_size, frame_size
            ),
            FrameError::CorrectedHopExceedsFrame {
                corrected_hop,
                frame_size,
            } => write!(
                f,
                "hop size corrected to {} exceeds frame size {}",
                corrected_hop, frame_size
            ),
            FrameError::NotInitialized => write!(f, "frame generator has not been set up"),
            FrameError::ChunkTooLarge { len, chunk_size } => write!(
                f,
                "input chunk of {} samples exceeds the configured chunk size {}",
                len, chunk_size
            ),
            FrameError::MissingChannel => write!(f, "input signal bank has no channels"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Errors reported while shaping a [`SignalBank`](crate::SignalBank).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalBankError {
    /// The channel count was zero.
    InvalidChannels,
    /// The sample rate was non-positive or non-finite.
    InvalidSampleRate,
}

impl fmt::Display for SignalBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalBankError::InvalidChannels => write!(f, "channel count must be at least 1"),
            SignalBankError::InvalidSampleRate => {
                write!(f, "sample rate must be finite and positive")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignalBankError {}

impl From<SignalBankError> for FrameError {
    fn from(err: SignalBankError) -> Self {
        match err {
            SignalBankError::InvalidChannels => FrameError::MissingChannel,
            SignalBankError::InvalidSampleRate => FrameError::InvalidSampleRate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_sizes() {
        let err = FrameError::HopExceedsFrame {
            hop_size: 8,
            frame_size: 4,
        };
        assert_eq!(
            err.to_string(),
            "hop size 8 cannot be greater than frame size 4"
        );
        let err = FrameError::ChunkTooLarge {
            len: 5,
            chunk_size: 2,
        };
        assert!(err.to_string().contains("5 samples"));
    }
}
