//! Fader opacity evaluation
//!
//! A pure function of the zoom value, the selected target, the x-ray state
//! and the three fade curves.

use crate::config::CurveConfig;
use crate::error::Result;
use crate::scene::EntityId;

use super::curve::FadeCurve;

/// The three opacity curves
#[derive(Debug, Clone, PartialEq)]
pub struct FadeCurves {
    /// Selected target while zoomed in
    pub target: FadeCurve,
    /// Focusable surfaces
    pub focusable: FadeCurve,
    /// Unfocusable surfaces, and non-selected targets while zoomed in
    pub unfocusable: FadeCurve,
}

impl FadeCurves {
    pub fn from_config(config: &CurveConfig) -> Result<Self> {
        Ok(Self {
            target: FadeCurve::from_keys("target", &config.target)?,
            focusable: FadeCurve::from_keys("focusable", &config.focusable)?,
            unfocusable: FadeCurve::from_keys("unfocusable", &config.unfocusable)?,
        })
    }
}

/// Inputs shared by every fader for one evaluation
#[derive(Debug, Clone, Copy)]
pub struct FadeInputs {
    pub zoom_target: f32,
    pub fade_margin: f32,
    pub selected: Option<EntityId>,
    pub xray_on: bool,
    pub xray_opacity: f32,
}

/// Curve samples for one evaluation, computed once and shared by every fader
#[derive(Debug, Clone, Copy)]
pub struct FadeLevels {
    inputs: FadeInputs,
    target: f32,
    focusable: f32,
    unfocusable: f32,
    opaque: f32,
}

impl FadeLevels {
    pub fn sample(curves: &FadeCurves, inputs: FadeInputs) -> Self {
        let z = inputs.zoom_target;
        Self {
            inputs,
            target: curves.target.evaluate(z),
            focusable: curves.focusable.evaluate(z),
            unfocusable: curves.unfocusable.evaluate(z) * inputs.xray_opacity,
            opaque: inputs.xray_opacity,
        }
    }

    fn zoomed_in(&self) -> bool {
        self.inputs.zoom_target < self.inputs.fade_margin
    }

    /// Zoomed in with nothing chosen and x-ray off: everything fully revealed
    fn nothing_chosen(&self) -> bool {
        self.inputs.selected.is_none() && !self.inputs.xray_on && self.zoomed_in()
    }

    /// Opacity of a surface under a focusable subtree owned by `owner`
    pub fn focused(&self, owner: EntityId) -> f32 {
        if self.nothing_chosen() {
            self.opaque
        } else if self.inputs.selected == Some(owner) && self.zoomed_in() {
            self.target
        } else if self.zoomed_in() {
            self.unfocusable
        } else {
            self.focusable
        }
    }

    /// Opacity of a surface outside every focusable subtree
    pub fn unfocused(&self) -> f32 {
        if self.nothing_chosen() {
            self.opaque
        } else {
            self.unfocusable
        }
    }
}
