//! Frame timing driven by the display scheduler
//!
//! The renderer's animation loop hands every frame callback a timestamp in
//! milliseconds. `FrameClock` turns those timestamps into per-frame deltas and
//! keeps simple statistics.

/// Tracks timestamps supplied by the animation loop
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
    delta_ms: f64,
    elapsed_ms: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock that has not seen a frame yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `timestamp_ms`
    ///
    /// Returns `None` (and leaves the clock untouched) when the timestamp goes
    /// backwards, otherwise the delta since the previous frame. The first frame
    /// has a delta of zero.
    pub fn advance(&mut self, timestamp_ms: f64) -> Option<f64> {
        let delta = match self.last_timestamp_ms {
            Some(last) if timestamp_ms < last => return None,
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };

        self.last_timestamp_ms = Some(timestamp_ms);
        self.delta_ms = delta;
        self.elapsed_ms += delta;
        self.frame_count += 1;
        Some(delta)
    }

    /// Timestamp of the last accepted frame
    pub fn last_timestamp_ms(&self) -> Option<f64> {
        self.last_timestamp_ms
    }

    /// Time since the previous frame in milliseconds
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Time elapsed since the first frame in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Number of frames accepted so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since the first frame
    pub fn average_fps(&self) -> f64 {
        if self.elapsed_ms > 0.0 {
            // The first frame contributes no elapsed time
            (self.frame_count.saturating_sub(1)) as f64 / (self.elapsed_ms / 1000.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.0), Some(0.0));
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_deltas_and_average_fps() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(500.0);
        clock.advance(1000.0);
        assert_eq!(clock.delta_ms(), 500.0);
        assert_eq!(clock.elapsed_ms(), 1000.0);
        assert!((clock.average_fps() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_timestamp_is_rejected() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        assert_eq!(clock.advance(50.0), None);
        assert_eq!(clock.last_timestamp_ms(), Some(100.0));
        assert_eq!(clock.frame_count(), 1);
    }
}
