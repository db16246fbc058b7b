//! Multi-channel sample container passed between processing modules.
//!
//! A [`SignalBank`] carries a block of samples per channel together with the
//! metadata downstream modules need: the sample rate of the underlying
//! stream, the rate at which blocks are produced, and a trigger flag that
//! marks a block as ready for consumption.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::SignalBankError;

/// Channel-major block of samples plus stream metadata.
///
/// Storage is allocated by [`SignalBank::initialize`] and reused afterwards;
/// sample access never reallocates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalBank {
    n_channels: usize,
    n_samples: usize,
    fs: f32,
    frame_rate: f32,
    trig: bool,
    data: Vec<f32>,
}

impl SignalBank {
    /// Create an empty, uninitialised bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape the bank to `n_channels` x `n_samples` zeroed samples at
    /// sample rate `fs`.
    ///
    /// The frame rate defaults to `fs / n_samples`, i.e. one block per
    /// `n_samples` input samples, and the trigger is cleared.
    pub fn initialize(
        &mut self,
        n_channels: usize,
        n_samples: usize,
        fs: f32,
    ) -> Result<(), SignalBankError> {
        if n_channels == 0 {
            return Err(SignalBankError::InvalidChannels);
        }
        if !fs.is_finite() || fs <= 0.0 {
            return Err(SignalBankError::InvalidSampleRate);
        }
        self.n_channels = n_channels;
        self.n_samples = n_samples;
        self.fs = fs;
        self.frame_rate = if n_samples > 0 {
            fs / n_samples as f32
        } else {
            0.0
        };
        self.trig = false;
        self.data = vec![0.0; n_channels * n_samples];
        Ok(())
    }

    /// Build a single-channel bank holding a copy of `samples`.
    pub fn from_mono(samples: &[f32], fs: f32) -> Result<Self, SignalBankError> {
        let mut bank = Self::new();
        bank.initialize(1, samples.len(), fs)?;
        bank.data.copy_from_slice(samples);
        Ok(bank)
    }

    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Sample rate of the underlying stream in Hz.
    pub fn fs(&self) -> f32 {
        self.fs
    }

    /// Rate, in blocks per second, at which this bank is refreshed.
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, frame_rate: f32) {
        self.frame_rate = frame_rate;
    }

    /// Whether the current contents are complete and ready downstream.
    pub fn trig(&self) -> bool {
        self.trig
    }

    pub fn set_trig(&mut self, trig: bool) {
        self.trig = trig;
    }

    /// Read sample `i` of channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` or `i` is out of range.
    #[inline]
    pub fn sample(&self, ch: usize, i: usize) -> f32 {
        self.channel(ch)[i]
    }

    /// Write sample `i` of channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` or `i` is out of range.
    #[inline]
    pub fn set_sample(&mut self, ch: usize, i: usize, value: f32) {
        self.channel_mut(ch)[i] = value;
    }

    /// All samples of channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch >= n_channels()`.
    #[inline]
    pub fn channel(&self, ch: usize) -> &[f32] {
        assert!(ch < self.n_channels, "channel {} out of range", ch);
        let start = ch * self.n_samples;
        &self.data[start..start + self.n_samples]
    }

    /// Mutable view of channel `ch`.
    ///
    /// # Panics
    ///
    /// Panics if `ch >= n_channels()`.
    #[inline]
    pub fn channel_mut(&mut self, ch: usize) -> &mut [f32] {
        assert!(ch < self.n_channels, "channel {} out of range", ch);
        let start = ch * self.n_samples;
        &mut self.data[start..start + self.n_samples]
    }

    /// Zero every sample while keeping shape and metadata.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|s| *s = 0.0);
    }
}
