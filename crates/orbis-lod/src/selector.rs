//! Distance-based subdivision depth selection and rebuild throttling.

use std::time::{Duration, Instant};

use crate::LodError;

/// Maps camera distance to a subdivision depth.
///
/// Depth falls linearly from `max_resolution` at the planet center to
/// `min_resolution` at `max_subdivision_distance` and beyond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodSelector {
    min_resolution: u32,
    max_resolution: u32,
    max_subdivision_distance: f32,
}

impl LodSelector {
    /// Create a selector, rejecting `min > max` and distances that are not
    /// positive and finite.
    pub fn new(
        min_resolution: u32,
        max_resolution: u32,
        max_subdivision_distance: f32,
    ) -> Result<Self, LodError> {
        if min_resolution > max_resolution {
            return Err(LodError::invalid(
                "min_resolution",
                format!("{min_resolution} exceeds max_resolution {max_resolution}"),
            ));
        }
        if !(max_subdivision_distance > 0.0 && max_subdivision_distance.is_finite()) {
            return Err(LodError::invalid(
                "max_subdivision_distance",
                format!("must be positive and finite, got {max_subdivision_distance}"),
            ));
        }
        Ok(Self {
            min_resolution,
            max_resolution,
            max_subdivision_distance,
        })
    }

    /// Depth returned at or beyond the maximum subdivision distance.
    pub fn min_resolution(&self) -> u32 {
        self.min_resolution
    }

    /// Depth returned for a camera on the planet center.
    pub fn max_resolution(&self) -> u32 {
        self.max_resolution
    }

    /// Pick the subdivision depth for a camera `distance` from the planet
    /// center.
    ///
    /// Halfway values round to the even depth. A NaN distance selects the
    /// minimum depth.
    pub fn select_depth(&self, distance: f32) -> u32 {
        let t = distance / self.max_subdivision_distance;
        if t.is_nan() {
            return self.min_resolution;
        }
        let t = t.clamp(0.0, 1.0);
        let max = self.max_resolution as f32;
        let min = self.min_resolution as f32;
        let depth = (max + (min - max) * t).round_ties_even();
        (depth as u32).clamp(self.min_resolution, self.max_resolution)
    }
}

/// Rate limiter for mesh rebuilds.
///
/// The first request is always granted; after that at most one request per
/// interval succeeds. A zero interval grants every request.
#[derive(Clone, Debug)]
pub struct UpdateThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl UpdateThrottle {
    /// A throttle that grants at most one request per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Minimum spacing between granted requests.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a rebuild may run at `now`. Granting a request starts a new
    /// interval.
    pub fn ready(&mut self, now: Instant) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    /// Forget the last granted request so the next one succeeds.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
