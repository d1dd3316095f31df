//! Zoom and x-ray state

use crate::config::{XrayConfig, ZoomConfig};

/// Continuous zoom value and its thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    /// 0 = inside the target, 1 = fully zoomed out
    pub zoom_target: f32,
    /// Value at scene start, used by reset-perspective
    pub starting: f32,
    /// True once a terminal snap has begun; never cleared
    pub is_snapping: bool,
    pub fade_margin: f32,
    pub point_of_no_return_low: f32,
    pub point_of_no_return_high: f32,
}

impl ZoomState {
    pub fn new(starting: f32, config: &ZoomConfig) -> Self {
        let margin = config.fade_margin;
        let depth = margin * config.point_of_no_return;
        Self {
            zoom_target: starting,
            starting,
            is_snapping: false,
            fade_margin: margin,
            point_of_no_return_low: depth,
            point_of_no_return_high: 1.0 - depth,
        }
    }

    /// Slows a gesture delta down as it pushes deeper into either margin
    ///
    /// The factor is the squared remaining fraction of the margin, so the
    /// value approaches the gesture limits ever more slowly.
    pub fn damp(&self, delta: f32) -> f32 {
        let margin = self.fade_margin;
        let z = self.zoom_target;

        if z < margin && delta < 0.0 {
            let depth = (margin - z) / margin;
            let factor = 1.0 - depth;
            return delta * factor * factor;
        }

        if z > 1.0 - margin && delta > 0.0 {
            let factor = (1.0 - z) / margin;
            return delta * factor * factor;
        }

        delta
    }
}

/// X-ray toggle and its animated opacity multiplier
#[derive(Debug, Clone, PartialEq)]
pub struct XrayState {
    pub on: bool,
    pub opacity: f32,
    step: f32,
    opacity_on: f32,
    opacity_off: f32,
}

impl XrayState {
    /// Starts off, fully opaque
    pub fn new(config: &XrayConfig) -> Self {
        Self {
            on: false,
            opacity: config.opacity_off,
            step: config.step,
            opacity_on: config.opacity_on,
            opacity_off: config.opacity_off,
        }
    }

    /// Opacity the animation is chasing
    pub fn goal(&self) -> f32 {
        if self.on {
            self.opacity_on
        } else {
            self.opacity_off
        }
    }

    /// Moves opacity one step toward its goal; returns true once it has arrived
    pub fn step(&mut self) -> bool {
        let low = self.opacity_on.min(self.opacity_off);
        let high = self.opacity_on.max(self.opacity_off);
        let direction = if self.goal() >= self.opacity { 1.0 } else { -1.0 };

        self.opacity = (self.opacity + direction * self.step).clamp(low, high);
        (self.opacity - self.goal()).abs() < 1e-4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(z: f32) -> ZoomState {
        let mut state = ZoomState::new(0.5, &ZoomConfig::default());
        state.zoom_target = z;
        state
    }

    #[test]
    fn test_thresholds_from_margin() {
        let state = state(0.5);
        assert_eq!(state.fade_margin, 0.25);
        assert_eq!(state.point_of_no_return_low, 0.125);
        assert_eq!(state.point_of_no_return_high, 0.875);
    }

    #[test]
    fn test_damping_only_inside_margins() {
        assert_eq!(state(0.5).damp(-0.2), -0.2);
        // Moving back out of the low margin is not damped
        assert_eq!(state(0.1).damp(0.2), 0.2);
        // Halfway into the low margin: (1 - 0.5)^2 = 0.25
        assert!((state(0.125).damp(-0.4) + 0.1).abs() < 1e-6);
        // Halfway into the high margin: (0.125 / 0.25)^2 = 0.25
        assert!((state(0.875).damp(0.4) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_xray_steps_down_then_back_up() {
        let mut xray = XrayState::new(&XrayConfig::default());
        xray.on = true;
        let mut steps = 0;
        while !xray.step() {
            steps += 1;
            assert!(steps < 100);
        }
        assert!((xray.opacity - 0.1).abs() < 1e-4);
        // 0.9 / 0.05 = 18 steps, the last one reports arrival
        assert_eq!(steps, 17);

        xray.on = false;
        while !xray.step() {}
        assert!((xray.opacity - 1.0).abs() < 1e-4);
    }
}
