//! Keeps track of the average of a frequently changing value

use std::collections::VecDeque;

/// The average of the most recent samples, up to a fixed window
#[derive(Clone, Debug)]
pub struct MovingAverage {
    window: usize,
    samples: VecDeque<f32>,
}

impl MovingAverage {
    /// Creates a new MovingAverage over the last `window` samples
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            samples: VecDeque::with_capacity(window.max(1)),
        }
    }

    /// Adds a sample, dropping the oldest if the window is full
    pub fn add_sample(&mut self, sample: f32) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Number of samples currently averaged
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been added yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the average of the samples in the window, or 0 if there are none
    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }
}
