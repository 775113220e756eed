//! Pointer tracking: cursor position smoothed into head/eye angles.

use glam::Vec2;

use crate::params::TrackingParams;

/// First-order low-pass filter from pointer position to view angles.
///
/// Pointer events arrive whenever they arrive; the filter only stores
/// the normalized position. Each frame tick moves the current angle a
/// configured fraction of the way toward the target, which converges
/// geometrically with ratio `1 - smoothing` per tick.
#[derive(Debug)]
pub struct TrackingFilter {
    params: TrackingParams,
    /// Normalized pointer position, both axes in [-1,1]
    pointer: Vec2,
    /// Smoothed output angle in degrees
    current: Vec2,
}

impl TrackingFilter {
    pub fn new(params: TrackingParams) -> Self {
        Self {
            params,
            pointer: Vec2::ZERO,
            current: Vec2::ZERO,
        }
    }

    /// Record a pointer position in surface coordinates.
    ///
    /// `bounds` is the stage size in the same coordinate space; events
    /// with degenerate bounds are ignored.
    pub fn pointer_moved(&mut self, x: f32, y: f32, bounds: (f32, f32)) {
        let (width, height) = bounds;
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.pointer = Vec2::new((x / width) * 2.0 - 1.0, (y / height) * 2.0 - 1.0);
        self.pointer = self.pointer.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Target angle for the current pointer position.
    ///
    /// Screen Y grows downward while the model's pitch grows upward,
    /// hence the negation.
    pub fn target(&self) -> Vec2 {
        Vec2::new(
            self.pointer.x * self.params.range_deg,
            -self.pointer.y * self.params.range_deg,
        )
    }

    /// Advance one tick toward the target; returns the smoothed angle,
    /// or `None` while tracking is disabled.
    pub fn tick(&mut self) -> Option<Vec2> {
        if !self.params.enabled {
            return None;
        }
        let target = self.target();
        self.current += (target - self.current) * self.params.smoothing;
        Some(self.current)
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn enabled_params() -> TrackingParams {
        TrackingParams {
            enabled: true,
            ..TrackingParams::default()
        }
    }

    #[test]
    fn test_pointer_normalization() {
        let mut filter = TrackingFilter::new(enabled_params());
        filter.pointer_moved(640.0, 0.0, (640.0, 960.0));

        // Right edge, top edge: +30° yaw, +30° pitch (screen Y flipped)
        let target = filter.target();
        assert_relative_eq!(target.x, 30.0);
        assert_relative_eq!(target.y, 30.0);
    }

    #[test]
    fn test_center_pointer_is_neutral() {
        let mut filter = TrackingFilter::new(enabled_params());
        filter.pointer_moved(320.0, 480.0, (640.0, 960.0));

        let target = filter.target();
        assert_relative_eq!(target.x, 0.0);
        assert_relative_eq!(target.y, 0.0);
    }

    #[test]
    fn test_degenerate_bounds_ignored() {
        let mut filter = TrackingFilter::new(enabled_params());
        filter.pointer_moved(100.0, 100.0, (640.0, 960.0));
        let before = filter.target();

        filter.pointer_moved(5.0, 5.0, (0.0, 0.0));
        assert_eq!(filter.target(), before);
    }

    #[test]
    fn test_geometric_convergence() {
        let params = enabled_params(); // smoothing 0.1
        let mut filter = TrackingFilter::new(params.clone());
        filter.pointer_moved(640.0, 480.0, (640.0, 960.0)); // target x = 30°

        let target_x = filter.target().x;
        let mut distance = (target_x - filter.current().x).abs();

        for _ in 0..100 {
            filter.tick().unwrap();
            let next = (target_x - filter.current().x).abs();
            assert_relative_eq!(next, distance * (1.0 - params.smoothing), epsilon = 1e-3);
            distance = next;
        }

        assert!(distance < 1e-3, "did not converge: {distance}");
    }

    #[test]
    fn test_convergence_is_monotonic() {
        let mut filter = TrackingFilter::new(enabled_params());
        filter.pointer_moved(0.0, 0.0, (640.0, 960.0));

        let target = filter.target();
        let mut prev = f32::INFINITY;
        for _ in 0..200 {
            filter.tick().unwrap();
            let distance = (target - filter.current()).length();
            assert!(distance <= prev);
            prev = distance;
        }
    }

    #[test]
    fn test_disabled_tracking_produces_nothing() {
        let mut filter = TrackingFilter::new(TrackingParams::default());
        filter.pointer_moved(640.0, 960.0, (640.0, 960.0));
        assert_eq!(filter.tick(), None);
        assert_eq!(filter.current(), Vec2::ZERO);
    }
}
