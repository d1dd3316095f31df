//! Controller configuration
//!
//! Supports multiple profiles (debug, release) with different settings.
//! Every field has a default, so a profile file only needs the values it
//! overrides.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{HyperzoomError, Result};
use crate::scene::ProjectionMode;

/// Pointer gesture classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pixels a pointer must travel from its press position before it counts as a drag
    pub drag_activation_distance: f32,
    /// Seconds of contact before a release counts as a hold
    pub hold_delay: f32,
    /// Zoom units per pixel of pinch distance change
    pub pinch_sensitivity: f32,
    /// Zoom units per scroll line
    pub scroll_sensitivity: f32,
    /// Seconds without interaction before a FinishZoom is emitted
    pub idle_timeout: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_activation_distance: 40.0,
            hold_delay: 0.6,
            pinch_sensitivity: 0.005,
            scroll_sensitivity: 0.1,
            idle_timeout: 1.0,
        }
    }
}

/// Keyboard, d-pad and analog stick mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternateInputConfig {
    /// Axis magnitude that fires a discrete action
    pub trigger_threshold: f32,
    /// Axis magnitude the axis must fall back under before re-arming
    pub release_threshold: f32,
    /// Stick magnitude below which the stick is at rest
    pub stick_dead_zone: f32,
    /// Zoom units per unit of left-stick deflection
    pub zoom_sensitivity: f32,
    /// Rotation units per unit of right-stick horizontal deflection
    pub rotate_sensitivity_horizontal: f32,
    /// Rotation units per unit of right-stick vertical deflection
    pub rotate_sensitivity_vertical: f32,
    /// Seconds the left stick must rest before FinishZoom fires
    pub zoom_rest_delay: f32,
}

impl Default for AlternateInputConfig {
    fn default() -> Self {
        Self {
            trigger_threshold: 0.75,
            release_threshold: 0.5,
            stick_dead_zone: 0.005,
            zoom_sensitivity: 0.333,
            rotate_sensitivity_horizontal: 10.0,
            rotate_sensitivity_vertical: 10.0,
            zoom_rest_delay: 0.25,
        }
    }
}

/// Zoom value thresholds and animation speeds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Width of the fading band at each end of the zoom range
    pub fade_margin: f32,
    /// Fraction of the fade margin past which a release commits to a transition
    pub point_of_no_return: f32,
    /// Lowest value a gesture alone can reach
    pub gesture_floor: f32,
    /// Highest value a gesture alone can reach
    pub gesture_ceiling: f32,
    /// Gesture multiplier for orthographic cameras
    pub sensitivity_orthographic: f32,
    /// Gesture multiplier for perspective cameras
    pub sensitivity_perspective: f32,
    /// Per-frame blend of the ZoomToward track
    pub toward_blend: f32,
    /// Per-step blend of the SnapTo track
    pub snap_blend: f32,
    /// Distance at which zoom animations jump to their goal
    pub snap_tolerance: f32,
    /// Per-frame increase of the scene fade-in level
    pub fade_in_step: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            fade_margin: 0.25,
            point_of_no_return: 0.5,
            gesture_floor: 0.05,
            gesture_ceiling: 0.95,
            sensitivity_orthographic: 0.1,
            sensitivity_perspective: 0.5,
            toward_blend: 0.25,
            snap_blend: 0.1,
            snap_tolerance: 0.01,
            fade_in_step: 0.05,
        }
    }
}

/// Camera rig projection range and rotation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Projection of the demo scene's rig camera
    pub projection: ProjectionMode,
    /// Projection value when fully zoomed in
    pub zoom_minimum: f32,
    /// Projection value at scene start
    pub zoom_starting_value: f32,
    /// Projection value when fully zoomed out
    pub zoom_maximum: f32,
    /// Whether pitch is clamped to the vertical limits
    pub clamp_vertical_angle: bool,
    /// Lowest pitch in degrees
    pub vertical_minimum: f32,
    /// Highest pitch in degrees
    pub vertical_maximum: f32,
    /// Degrees per viewport width of drag
    pub rotation_speed: f32,
    /// Per-frame blend of the rotate-reset track
    pub rotate_blend: f32,
    /// Angle in degrees at which the rotate-reset track jumps to its goal
    pub rotate_tolerance_degrees: f32,
    /// Per-frame blend of the rig toward the selected target
    pub follow_blend: f32,
    /// Background colour of the demo scene's rig camera (linear RGBA)
    pub background: [f32; 4],
    /// Name of the entity selected at scene start
    pub initial_target: Option<String>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Orthographic,
            zoom_minimum: 5.0,
            zoom_starting_value: 12.5,
            zoom_maximum: 20.0,
            clamp_vertical_angle: true,
            vertical_minimum: 2.0,
            vertical_maximum: 80.0,
            rotation_speed: 500.0,
            rotate_blend: 0.25,
            rotate_tolerance_degrees: 1.0,
            follow_blend: 0.5,
            background: [0.19, 0.3, 0.47, 1.0],
            initial_target: None,
        }
    }
}

/// X-ray reveal animation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XrayConfig {
    /// Opacity change per fixed step
    pub step: f32,
    /// Opacity multiplier while x-ray is on
    pub opacity_on: f32,
    /// Opacity multiplier while x-ray is off
    pub opacity_off: f32,
    /// Seconds to wait before fading in when x-ray turns on
    pub on_delay: f32,
}

impl Default for XrayConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            opacity_on: 0.1,
            opacity_off: 1.0,
            on_delay: 0.1,
        }
    }
}

/// Fade curve keyframes as `[time, value]` pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Opacity of the selected target while zoomed in
    pub target: Vec<[f32; 2]>,
    /// Opacity of focusable surfaces
    pub focusable: Vec<[f32; 2]>,
    /// Opacity of everything else
    pub unfocusable: Vec<[f32; 2]>,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            target: vec![
                [0.0, 0.0],
                [0.05, 0.968],
                [0.25, 1.0],
                [0.75, 1.0],
                [0.95, 0.0],
            ],
            focusable: vec![[0.0, 0.1], [0.25, 1.0], [0.75, 1.0], [0.95, 1.0]],
            unfocusable: vec![[0.11, 0.0], [0.25, 1.0], [0.75, 1.0], [0.9, 0.0]],
        }
    }
}

/// Host loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds per fixed simulation step
    pub fixed_timestep: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 0.02,
        }
    }
}

/// Demo host window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width
    pub width: f64,
    /// Logical height
    pub height: f64,
    pub fullscreen: bool,
    pub resizable: bool,
    /// Whether the window has a title bar and borders
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hyperzoom".to_string(),
            width: 1024.0,
            height: 768.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperzoomConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    pub gesture: GestureConfig,
    pub alternate: AlternateInputConfig,
    pub zoom: ZoomConfig,
    pub camera: CameraConfig,
    pub xray: XrayConfig,
    pub curves: CurveConfig,
    pub timing: TimingConfig,
    pub window: WindowConfig,
}

impl Default for HyperzoomConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            gesture: GestureConfig::default(),
            alternate: AlternateInputConfig::default(),
            zoom: ZoomConfig::default(),
            camera: CameraConfig::default(),
            xray: XrayConfig::default(),
            curves: CurveConfig::default(),
            timing: TimingConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl HyperzoomConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/{profile}.toml
    /// 2. Environment variables with prefix HYPERZOOM_ (e.g., HYPERZOOM_ZOOM__FADE_MARGIN=0.3)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self> {
        match Self::find_config_dir() {
            Some(dir) => Self::load_from_dir(&dir, profile),
            None => Self::build(None, profile),
        }
    }

    /// Loads a profile from an explicit config directory
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self> {
        Self::build(Some(dir.join(profile)), profile)
    }

    fn build(profile_path: Option<PathBuf>, profile: &str) -> Result<Self> {
        let mut builder = Config::builder();

        builder = match profile_path {
            Some(path) => builder.add_source(File::from(path.as_path()).required(false)),
            None => builder.add_source(File::with_name(&format!("config/{profile}")).required(false)),
        };

        // Use __ as separator for nested fields (e.g., HYPERZOOM_CAMERA__ZOOM_MAXIMUM)
        builder = builder.add_source(
            Environment::with_prefix("HYPERZOOM")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .set_override("profile", profile)?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the HYPERZOOM_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self> {
        let profile = std::env::var("HYPERZOOM_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Rejects values the controller cannot run with
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if camera.zoom_minimum >= camera.zoom_maximum {
            return Err(HyperzoomError::InvalidZoomRange {
                minimum: camera.zoom_minimum,
                maximum: camera.zoom_maximum,
            });
        }
        if !(camera.zoom_minimum..=camera.zoom_maximum).contains(&camera.zoom_starting_value) {
            return Err(HyperzoomError::InvalidConfig(format!(
                "camera.zoom_starting_value {} outside [{}, {}]",
                camera.zoom_starting_value, camera.zoom_minimum, camera.zoom_maximum
            )));
        }

        let zoom = &self.zoom;
        if !(zoom.fade_margin > 0.0 && zoom.fade_margin < 0.5) {
            return Err(HyperzoomError::InvalidConfig(format!(
                "zoom.fade_margin {} outside (0, 0.5)",
                zoom.fade_margin
            )));
        }
        if !(0.0..=1.0).contains(&zoom.point_of_no_return) {
            return Err(HyperzoomError::InvalidConfig(format!(
                "zoom.point_of_no_return {} outside [0, 1]",
                zoom.point_of_no_return
            )));
        }
        if zoom.gesture_floor >= zoom.gesture_ceiling {
            return Err(HyperzoomError::InvalidConfig(format!(
                "zoom.gesture_floor {} must be below zoom.gesture_ceiling {}",
                zoom.gesture_floor, zoom.gesture_ceiling
            )));
        }

        let steps = [
            ("zoom.toward_blend", zoom.toward_blend),
            ("zoom.snap_blend", zoom.snap_blend),
            ("zoom.snap_tolerance", zoom.snap_tolerance),
            ("zoom.fade_in_step", zoom.fade_in_step),
            ("camera.rotate_blend", camera.rotate_blend),
            ("xray.step", self.xray.step),
            ("timing.fixed_timestep", self.timing.fixed_timestep),
        ];
        for (name, value) in steps {
            if value <= 0.0 {
                return Err(HyperzoomError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let alternate = &self.alternate;
        if alternate.release_threshold > alternate.trigger_threshold {
            return Err(HyperzoomError::InvalidConfig(format!(
                "alternate.release_threshold {} above alternate.trigger_threshold {}",
                alternate.release_threshold, alternate.trigger_threshold
            )));
        }

        for (name, keys) in [
            ("target", &self.curves.target),
            ("focusable", &self.curves.focusable),
            ("unfocusable", &self.curves.unfocusable),
        ] {
            crate::zoom::FadeCurve::from_keys(name, keys)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = HyperzoomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.zoom.fade_margin, 0.25);
        assert_eq!(config.gesture.drag_activation_distance, 40.0);
    }

    #[test]
    fn test_load_partial_profile_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("demo.toml"),
            "[zoom]\nfade_margin = 0.3\n\n[camera]\nprojection = \"perspective\"\n",
        )
        .unwrap();

        let config = HyperzoomConfig::load_from_dir(dir.path(), "demo").unwrap();
        assert_eq!(config.profile, "demo");
        assert_eq!(config.zoom.fade_margin, 0.3);
        assert_eq!(config.camera.projection, ProjectionMode::Perspective);
        // Untouched sections keep their defaults
        assert_eq!(config.zoom.snap_blend, 0.1);
        assert_eq!(config.xray.opacity_on, 0.1);
    }

    #[test]
    fn test_missing_profile_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HyperzoomConfig::load_from_dir(dir.path(), "absent").unwrap();
        assert_eq!(config.profile, "absent");
        assert_eq!(config.camera.zoom_maximum, 20.0);
    }

    #[test]
    fn test_inverted_zoom_range_is_rejected() {
        let mut config = HyperzoomConfig::default();
        config.camera.zoom_minimum = 30.0;
        assert!(matches!(
            config.validate(),
            Err(HyperzoomError::InvalidZoomRange { .. })
        ));
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.toml"), "[zoom]\nfade_margin = 0.9\n").unwrap();
        assert!(matches!(
            HyperzoomConfig::load_from_dir(dir.path(), "bad"),
            Err(HyperzoomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unsorted_curve_is_rejected() {
        let mut config = HyperzoomConfig::default();
        config.curves.target = vec![[0.5, 1.0], [0.1, 0.0]];
        assert!(matches!(
            config.validate(),
            Err(HyperzoomError::InvalidCurve { .. })
        ));
    }
}
