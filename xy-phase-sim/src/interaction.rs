//! Pointer painting and the global-rotation gesture.
//!
//! Both are plain flag holders. UI callbacks flip them between frames; the
//! simulation reads them at the start of the next frame and is the only
//! place grids are touched.

use log::debug;

/// Reference frame duration the rotation step is expressed in (60 Hz).
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

// ─────────────────────────────────────────────────────────────────────────────
// Pointer override
// ─────────────────────────────────────────────────────────────────────────────

/// Canvas-local pointer state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionState {
    pointer: Option<(f64, f64)>,
    active: bool,
}

fn inside(x: f64, y: f64, extent: (f64, f64)) -> bool {
    x.is_finite() && y.is_finite() && (0.0..=extent.0).contains(&x) && (0.0..=extent.1).contains(&y)
}

impl InteractionState {
    /// Pointer pressed at `(x, y)` on a canvas of size `extent`.
    /// A press outside the canvas is ignored.
    pub fn press(&mut self, x: f64, y: f64, extent: (f64, f64)) {
        if inside(x, y, extent) {
            self.pointer = Some((x, y));
            self.active = true;
        } else {
            self.end();
        }
    }

    /// Pointer moved. Leaving the canvas ends the interaction rather than
    /// pinning it to the edge.
    pub fn move_to(&mut self, x: f64, y: f64, extent: (f64, f64)) {
        if !self.active {
            return;
        }
        if inside(x, y, extent) {
            self.pointer = Some((x, y));
        } else {
            self.end();
        }
    }

    /// Pointer released or left the canvas.
    pub fn end(&mut self) {
        self.pointer = None;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pointer(&self) -> Option<(f64, f64)> {
        if self.active {
            self.pointer
        } else {
            None
        }
    }

    /// Angle from `center` toward the pointer when the centre lies within
    /// `radius` of it, `None` otherwise.
    #[inline]
    pub fn pull(&self, center: (f64, f64), radius: f64) -> Option<f64> {
        let (px, py) = self.pointer()?;
        let dx = px - center.0;
        let dy = py - center.1;
        if dx * dx + dy * dy <= radius * radius {
            Some(dy.atan2(dx))
        } else {
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Global rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Held-down "rotate" gesture: a uniform phase shift of the whole field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    active: bool,
    /// Radians per reference (60 Hz) frame.
    step: f64,
}

impl RotationState {
    pub fn new(step: f64) -> Self {
        Self {
            active: false,
            step,
        }
    }

    pub fn start(&mut self) {
        if !self.active {
            debug!("global rotation started");
        }
        self.active = true;
    }

    /// Stop on release, focus loss or pointer leaving the control.
    pub fn stop(&mut self) {
        if self.active {
            debug!("global rotation stopped");
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Frame-rate independent increment for `elapsed_ms` of wall time.
    #[inline]
    pub fn increment(&self, elapsed_ms: f64) -> f64 {
        self.step * (elapsed_ms.max(0.0) / REFERENCE_FRAME_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: (f64, f64) = (200.0, 100.0);

    #[test]
    fn press_inside_activates() {
        let mut s = InteractionState::default();
        s.press(50.0, 20.0, CANVAS);
        assert!(s.is_active());
        assert_eq!(s.pointer(), Some((50.0, 20.0)));
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut s = InteractionState::default();
        s.press(250.0, 20.0, CANVAS);
        assert!(!s.is_active());
        assert_eq!(s.pointer(), None);
    }

    #[test]
    fn moving_out_of_bounds_ends_interaction() {
        let mut s = InteractionState::default();
        s.press(10.0, 10.0, CANVAS);
        s.move_to(-1.0, 10.0, CANVAS);
        assert!(!s.is_active());
        // Coming back without a press does not resume painting.
        s.move_to(10.0, 10.0, CANVAS);
        assert!(!s.is_active());
    }

    #[test]
    fn pull_points_at_pointer_inside_radius() {
        let mut s = InteractionState::default();
        s.press(10.0, 10.0, CANVAS);
        let a = s.pull((10.0, 0.0), 15.0).unwrap();
        assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(s.pull((100.0, 100.0), 15.0).is_none());
    }

    #[test]
    fn released_pointer_pulls_nothing() {
        let mut s = InteractionState::default();
        s.press(10.0, 10.0, CANVAS);
        s.end();
        assert!(s.pull((10.0, 10.0), 100.0).is_none());
    }

    #[test]
    fn rotation_increment_scales_with_elapsed_time() {
        let r = RotationState::new(0.03);
        assert!((r.increment(REFERENCE_FRAME_MS) - 0.03).abs() < 1e-12);
        assert!((r.increment(2.0 * REFERENCE_FRAME_MS) - 0.06).abs() < 1e-12);
        assert_eq!(r.increment(-5.0), 0.0);
    }

    #[test]
    fn rotation_start_stop() {
        let mut r = RotationState::new(0.03);
        assert!(!r.is_active());
        r.start();
        assert!(r.is_active());
        r.stop();
        r.stop();
        assert!(!r.is_active());
    }
}
