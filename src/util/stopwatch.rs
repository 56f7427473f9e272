//! Keeps track of time spent in each stage of a frame

use crate::util::moving_average::MovingAverage;
use log::debug;
use std::time::Instant;

/// Times a frame split into named segments, averaged over recent frames.
///
/// Segments must be marked in the same order every frame; the first frame fixes the order.
#[derive(Clone, Debug)]
pub struct Stopwatch {
    name: String,
    window: usize,

    frame_start: Option<Instant>,
    segment_start: Option<Instant>,
    segment: usize,

    frame_average: MovingAverage,
    segment_averages: Vec<(String, MovingAverage)>,
}

impl Stopwatch {
    /// Creates a new Stopwatch averaging over the last `window` frames
    pub fn new(name: &str, window: usize) -> Self {
        Self {
            name: name.to_string(),
            window,
            frame_start: None,
            segment_start: None,
            segment: 0,
            frame_average: MovingAverage::new(window),
            segment_averages: vec![],
        }
    }

    /// Get this stopwatch's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mark the beginning of a frame
    pub fn start(&mut self) {
        let now = Instant::now();
        self.frame_start = Some(now);
        self.segment_start = Some(now);
        self.segment = 0;
    }

    /// Mark the end of the segment `name`; ignored before [`Stopwatch::start`]
    pub fn mark_segment(&mut self, name: &str) {
        let now = Instant::now();
        let Some(segment_start) = self.segment_start else {
            return;
        };
        let millis = now.duration_since(segment_start).as_secs_f32() * 1000.0;

        if self.segment == self.segment_averages.len() {
            // first time this segment has been seen
            self.segment_averages
                .push((name.to_string(), MovingAverage::new(self.window)));
        }
        self.segment_averages[self.segment].1.add_sample(millis);
        debug!("{}: {} took {:.2}ms", self.name, name, millis);

        self.segment_start = Some(now);
        self.segment += 1;
    }

    /// Mark the end of the frame; ignored before [`Stopwatch::start`]
    pub fn finish(&mut self) {
        if let Some(frame_start) = self.frame_start.take() {
            let millis = frame_start.elapsed().as_secs_f32() * 1000.0;
            self.frame_average.add_sample(millis);
        }
        self.segment_start = None;
    }

    /// Number of frames that have been finished, up to the window size
    pub fn frames(&self) -> usize {
        self.frame_average.len()
    }

    /// Average milliseconds from [`Stopwatch::start`] to [`Stopwatch::finish`]
    pub fn average_frame_millis(&self) -> f32 {
        self.frame_average.average()
    }

    /// Average milliseconds spent in each segment, in the order they are marked
    pub fn average_segment_millis(&self) -> Vec<(String, f32)> {
        self.segment_averages
            .iter()
            .map(|(name, average)| (name.to_owned(), average.average()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn segments_keep_order() {
        let mut stopwatch = Stopwatch::new("frame", 4);
        for _ in 0..3 {
            stopwatch.start();
            sleep(Duration::from_millis(2));
            stopwatch.mark_segment("cast");
            sleep(Duration::from_millis(1));
            stopwatch.mark_segment("render");
            stopwatch.finish();
        }

        let segments = stopwatch.average_segment_millis();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].0, "cast");
        assert_eq!(segments[1].0, "render");
        assert!(segments[0].1 >= 2.0);
        assert!(segments[1].1 >= 1.0);
        assert!(stopwatch.average_frame_millis() >= segments[0].1 + segments[1].1 - 1e-3);
        assert_eq!(stopwatch.frames(), 3);
    }

    #[test]
    fn marks_before_start_are_ignored() {
        let mut stopwatch = Stopwatch::new("idle", 2);
        stopwatch.mark_segment("cast");
        stopwatch.finish();
        assert!(stopwatch.average_segment_millis().is_empty());
        assert_eq!(stopwatch.frames(), 0);
        assert_eq!(stopwatch.name(), "idle");
    }
}
