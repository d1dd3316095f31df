//! The zoom/focus controller
//!
//! Owns the continuous zoom value, the selected target, the x-ray toggle and
//! every animation track. Input arrives as [`HyperzoomEvent`]s on the bus the
//! controller owns; `pump` applies each queued event to the controller and
//! then fans it out to subscribers, so transition signals raised while an
//! event is being applied are delivered in order behind it.
//!
//! While `is_snapping` is set the controller is locked: zoom, rotate and
//! focus input is dropped and only the in-flight snap keeps running.

use glam::{Quat, Vec2, Vec3};
use palette::Srgba;
use tracing::{debug, error, info, trace, warn};

use crate::bus::{EventBus, HyperzoomEvent, Subscriber, SubscriptionId};
use crate::config::HyperzoomConfig;
use crate::error::{HyperzoomError, Result};
use crate::scene::{
    Camera, EntityId, FocusRegistry, FrameOutput, PitchClamp, ProjectionMode, SceneGraph,
    SceneOutput, ZoomRange,
};
use crate::transition::{SceneTransitionSink, TransitionSubscriber};

use super::fader::{FadeCurves, FadeInputs, FadeLevels};
use super::state::{XrayState, ZoomState};
use super::tracks::{Cadence, Track, TrackKind, TrackSlots};

/// Events one `pump` may deliver before it yields to the next tick
const MAX_EVENTS_PER_PUMP: usize = 1024;

/// Frame-cadence tracks in the order they are resumed
const FRAME_TRACKS: [TrackKind; 4] = [
    TrackKind::FadeIn,
    TrackKind::ZoomToward,
    TrackKind::RotateReset,
    TrackKind::Xray,
];

/// Fixed-cadence tracks in the order they are resumed
const FIXED_TRACKS: [TrackKind; 2] = [TrackKind::SnapTo, TrackKind::Xray];

/// Camera-focus and zoom state machine
pub struct ZoomFocusController<O: SceneOutput = FrameOutput> {
    config: HyperzoomConfig,
    zoom: ZoomState,
    xray: XrayState,
    camera: Camera,
    registry: FocusRegistry,
    curves: FadeCurves,
    target: Option<EntityId>,
    starting_rotation: Quat,
    /// Degrees per pixel of drag
    rotation_speed: f32,
    pitch_clamp: Option<PitchClamp>,
    /// Scene fade-in multiplier applied to every written opacity
    fade_level: f32,
    tracks: TrackSlots,
    bus: EventBus,
    transition_sinks: Vec<SubscriptionId>,
    output: O,
    active: bool,
}

impl<O: SceneOutput> ZoomFocusController<O> {
    /// Builds the controller from a scene snapshot
    ///
    /// Fails if the config does not validate, or the scene has no input root
    /// or no usable camera. On success
    /// every surface is hidden and the scene fade-in has started; the
    /// background colour is queued for the first `pump`.
    pub fn new(
        scene: &SceneGraph,
        config: &HyperzoomConfig,
        viewport_width: f32,
        output: O,
    ) -> Result<Self> {
        config.validate()?;
        if !scene.has_input_root() {
            error!("Scene has no input-system root");
            return Err(HyperzoomError::MissingInputRoot);
        }

        let spec = match (scene.rig_camera(), scene.main_camera()) {
            (Some(rig), _) => *rig,
            (None, Some(main)) => {
                warn!("Zoom rig has no camera, defaulting to main camera");
                *main
            }
            (None, None) => {
                error!("Scene has no camera");
                return Err(HyperzoomError::MissingCamera);
            }
        };

        let curves = FadeCurves::from_config(&config.curves)?;
        let camera_config = &config.camera;
        let range = ZoomRange::new(
            camera_config.zoom_minimum,
            camera_config.zoom_starting_value,
            camera_config.zoom_maximum,
        );
        let camera =
            Camera::new(spec.projection, range).with_orientation(spec.yaw, spec.pitch);
        let pitch_clamp = camera_config.clamp_vertical_angle.then_some(PitchClamp {
            minimum: camera_config.vertical_minimum,
            maximum: camera_config.vertical_maximum,
        });

        let registry = FocusRegistry::scan(scene);
        let target = Self::initial_target(&registry, camera_config.initial_target.as_deref());

        let mut controller = Self {
            zoom: ZoomState::new(range.starting_pct(), &config.zoom),
            xray: XrayState::new(&config.xray),
            starting_rotation: camera.rotation,
            rotation_speed: camera_config.rotation_speed / viewport_width.max(1.0),
            pitch_clamp,
            camera,
            registry,
            curves,
            target,
            fade_level: 0.0,
            tracks: TrackSlots::new(),
            bus: EventBus::new(),
            transition_sinks: Vec::new(),
            output,
            active: true,
            config: config.clone(),
        };

        info!(
            projection = ?spec.projection,
            targets = controller.registry.target_count(),
            focused = controller.registry.focused_count(),
            unfocused = controller.registry.unfocused_count(),
            target = ?controller.target.and_then(|t| controller.registry.name_of(t)),
            "Zoom controller initialized"
        );

        let [r, g, b, a] = spec.background;
        controller
            .bus
            .publish(HyperzoomEvent::BackgroundColorChanged(Srgba::new(r, g, b, a)));

        controller.write_projection();
        controller.start_track(Track::FadeIn { level: 0.0 });

        Ok(controller)
    }

    fn initial_target(registry: &FocusRegistry, name: Option<&str>) -> Option<EntityId> {
        if let Some(name) = name {
            match registry.find_by_name(name) {
                Some(target) => return Some(target),
                None => warn!(name, "Configured initial target not found in scene"),
            }
        }
        match registry.targets() {
            [only] => {
                debug!(target = ?only, "Auto-selecting the only focusable target");
                Some(*only)
            }
            _ => None,
        }
    }

    /// Stops every track and drops every subscriber
    pub fn shutdown(&mut self) {
        self.tracks.cancel_all();
        self.bus.clear();
        self.transition_sinks.clear();
        self.active = false;
        debug!("Zoom controller shut down");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // ---------------------------------------------------------------------
    // Bus
    // ---------------------------------------------------------------------

    /// Queue an event; it takes effect on the next `pump`
    pub fn publish(&mut self, event: HyperzoomEvent) {
        self.bus.publish(event);
    }

    /// Publish one event and pump it through
    pub fn dispatch(&mut self, event: HyperzoomEvent) -> usize {
        self.publish(event);
        self.pump()
    }

    /// Apply and deliver every queued event, including follow-ups
    ///
    /// Returns the number of events processed.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.bus.pop() {
            self.apply(&event);
            self.bus.deliver(&event);
            delivered += 1;

            if delivered == MAX_EVENTS_PER_PUMP {
                warn!(
                    pending = self.bus.pending(),
                    "Event pump limit reached, deferring the rest to the next tick"
                );
                break;
            }
        }
        delivered
    }

    fn apply(&mut self, event: &HyperzoomEvent) {
        if !self.active {
            return;
        }
        match *event {
            HyperzoomEvent::Rotate { delta, .. } => self.on_rotate(delta),
            HyperzoomEvent::Zoom(delta) => self.on_zoom(delta),
            HyperzoomEvent::FinishZoom => self.on_cleanup(),
            HyperzoomEvent::TouchCountChanged { count, previous } => {
                self.on_touch_changed(count, previous)
            }
            HyperzoomEvent::Dragged { .. } => self.on_dragged(),
            HyperzoomEvent::Clicked(entity) => self.on_change_focus(entity),
            HyperzoomEvent::ZoomIn => self.on_zoom_in(),
            HyperzoomEvent::ZoomOut => self.on_zoom_out(),
            HyperzoomEvent::SelectNext => self.on_select_next(),
            HyperzoomEvent::SelectPrevious => self.on_select_previous(),
            HyperzoomEvent::BackgroundColorChanged(_)
            | HyperzoomEvent::ZoomInStarted(_)
            | HyperzoomEvent::ZoomInFinished(_)
            | HyperzoomEvent::ZoomOutStarted
            | HyperzoomEvent::ZoomOutFinished => {}
        }
    }

    /// Register a bus listener
    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        self.bus.subscribe(subscriber)
    }

    /// Remove a bus listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Option<Box<dyn Subscriber>> {
        self.transition_sinks.retain(|sink| *sink != id);
        self.bus.unsubscribe(id)
    }

    /// Connect the scene-transition sink
    ///
    /// Terminal snaps to 0 or 1 are only chosen while a sink is attached.
    pub fn attach_transition_sink<S>(&mut self, sink: S) -> SubscriptionId
    where
        S: SceneTransitionSink + 'static,
    {
        let id = self.bus.subscribe(Box::new(TransitionSubscriber::new(sink)));
        self.transition_sinks.push(id);
        id
    }

    /// Typed access to an attached sink
    pub fn transition_sink_mut<S>(&mut self, id: SubscriptionId) -> Option<&mut S>
    where
        S: SceneTransitionSink + 'static,
    {
        self.bus
            .get_subscriber_typed_mut::<TransitionSubscriber<S>>(id)
            .map(TransitionSubscriber::sink_mut)
    }

    pub fn has_transition_sink(&self) -> bool {
        !self.transition_sinks.is_empty()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // ---------------------------------------------------------------------
    // Clock
    // ---------------------------------------------------------------------

    /// Frame cadence: resumes frame tracks, follows the target, flushes the bus
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        for kind in FRAME_TRACKS {
            self.resume(kind, Cadence::Frame, dt);
        }
        self.follow_target();
        self.pump();
    }

    /// Fixed cadence: resumes snap and x-ray stepping, flushes the bus
    pub fn fixed_tick(&mut self) {
        if !self.active {
            return;
        }
        for kind in FIXED_TRACKS {
            self.resume(kind, Cadence::Fixed, 0.0);
        }
        self.pump();
    }

    fn follow_target(&mut self) {
        let goal = self
            .target
            .and_then(|t| self.registry.position_of(t))
            .unwrap_or(Vec3::ZERO);
        self.camera.follow(goal, self.config.camera.follow_blend);
        self.output.set_rig(self.camera.position, self.camera.rotation);
    }

    /// Viewport resized; keeps rotation resolution-independent
    pub fn set_viewport_width(&mut self, width: f32) {
        self.rotation_speed = self.config.camera.rotation_speed / width.max(1.0);
    }

    // ---------------------------------------------------------------------
    // Tracks
    // ---------------------------------------------------------------------

    /// Replaces the occupant of the track's slot and runs its first step now
    fn start_track(&mut self, track: Track) {
        trace!(?track, "Track started");
        self.tracks.start(track);
        if let Some((track, token)) = self.tracks.take(track.kind()) {
            if let Some(next) = self.step(track, 0.0) {
                self.tracks.restore(next, token);
            }
        }
    }

    fn resume(&mut self, kind: TrackKind, cadence: Cadence, dt: f32) {
        if let Some((track, token)) = self.tracks.take_on(kind, cadence) {
            match self.step(track, dt) {
                Some(next) => self.tracks.restore(next, token),
                None => trace!(?kind, "Track finished"),
            }
        }
    }

    /// Runs one step; `None` once the track is done
    fn step(&mut self, track: Track, dt: f32) -> Option<Track> {
        match track {
            Track::ZoomToward { goal } => self.step_zoom_toward(goal).then_some(track),
            Track::SnapTo { goal } => self.step_snap(goal).then_some(track),
            Track::RotateReset { goal } => self.step_rotate_reset(goal).then_some(track),
            Track::Xray { delay } if delay > 0.0 => Some(Track::Xray { delay: delay - dt }),
            Track::Xray { .. } => (!self.step_xray()).then_some(track),
            Track::FadeIn { level } => self.step_fade_in(level),
        }
    }

    fn step_zoom_toward(&mut self, goal: f32) -> bool {
        let z = self.zoom.zoom_target;
        if (goal - z).abs() > self.config.zoom.snap_tolerance {
            self.zoom.zoom_target = z + (goal - z) * self.config.zoom.toward_blend;
            self.write_zoom();
            return true;
        }
        self.zoom.zoom_target = goal;
        self.write_zoom();
        self.on_cleanup();
        false
    }

    fn step_snap(&mut self, goal: f32) -> bool {
        let z = self.zoom.zoom_target;
        if (z - goal).abs() > self.config.zoom.snap_tolerance {
            self.zoom.zoom_target = z + (goal - z) * self.config.zoom.snap_blend;
            self.write_zoom();
            return true;
        }
        self.zoom.zoom_target = goal;
        self.write_zoom();

        if goal == 0.0 {
            if self.target.is_none() {
                error!("Finishing zoom-in without a target");
            }
            self.bus.publish(HyperzoomEvent::ZoomInFinished(self.target));
        } else if goal == 1.0 {
            self.bus.publish(HyperzoomEvent::ZoomOutFinished);
        }
        false
    }

    fn step_rotate_reset(&mut self, goal: Quat) -> bool {
        if self.camera.angle_to(goal) > self.config.camera.rotate_tolerance_degrees {
            self.camera
                .blend_rotation(goal, self.config.camera.rotate_blend);
            return true;
        }
        self.camera.rotation = goal;
        false
    }

    /// True once the opacity has arrived
    fn step_xray(&mut self) -> bool {
        let arrived = self.xray.step();
        self.write_opacities();
        arrived
    }

    fn step_fade_in(&mut self, level: f32) -> Option<Track> {
        self.fade_level = level.clamp(0.0, 1.0);
        self.write_opacities();
        if level >= 1.0 {
            return None;
        }
        Some(Track::FadeIn {
            level: level + self.config.zoom.fade_in_step,
        })
    }

    // ---------------------------------------------------------------------
    // Scene writes
    // ---------------------------------------------------------------------

    fn write_projection(&mut self) {
        let value = self.camera.zoom_to_pct(self.zoom.zoom_target);
        self.output.set_projection(self.camera.mode, value);
    }

    fn write_zoom(&mut self) {
        self.write_projection();
        self.write_opacities();
    }

    fn write_opacities(&mut self) {
        let levels = FadeLevels::sample(
            &self.curves,
            FadeInputs {
                zoom_target: self.zoom.zoom_target,
                fade_margin: self.zoom.fade_margin,
                selected: self.target,
                xray_on: self.xray.on,
                xray_opacity: self.xray.opacity,
            },
        );
        let fade = self.fade_level;

        for (surface, owner) in self.registry.focused() {
            self.output.set_opacity(surface, levels.focused(owner) * fade);
        }
        for surface in self.registry.unfocused() {
            self.output.set_opacity(surface, levels.unfocused() * fade);
        }
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    fn locked(&self, operation: &'static str) -> bool {
        if self.zoom.is_snapping {
            trace!(operation, "Ignored while snapping");
        }
        self.zoom.is_snapping
    }

    fn on_zoom(&mut self, delta: f32) {
        if self.locked("zoom") {
            return;
        }
        if !delta.is_finite() {
            trace!(delta, "Ignoring non-finite zoom delta");
            return;
        }
        self.cancel_reset_perspective();

        let sensitivity = match self.camera.mode {
            ProjectionMode::Orthographic => self.config.zoom.sensitivity_orthographic,
            ProjectionMode::Perspective => self.config.zoom.sensitivity_perspective,
        };
        let damped = self.zoom.damp(delta);
        self.zoom.zoom_target = (self.zoom.zoom_target + damped * sensitivity)
            .clamp(self.config.zoom.gesture_floor, self.config.zoom.gesture_ceiling);

        self.write_zoom();
        self.on_set_xray(false);
    }

    fn on_zoom_in(&mut self) {
        if self.locked("zoom_in") {
            return;
        }
        self.cancel_reset_perspective();

        let z = self.zoom.zoom_target;
        let goal = if self.target.is_some() && z < 0.4 {
            self.zoom.point_of_no_return_low
        } else if z >= 0.666 {
            0.5
        } else if z > self.zoom.fade_margin {
            self.zoom.fade_margin
        } else {
            z
        };
        self.zoom_toward(goal);
    }

    fn on_zoom_out(&mut self) {
        if self.locked("zoom_out") {
            return;
        }
        self.cancel_reset_perspective();

        let z = self.zoom.zoom_target;
        let goal = if z > 0.6 {
            self.zoom.point_of_no_return_high
        } else if z < 0.333 {
            0.5
        } else if z < 1.0 - self.zoom.fade_margin {
            1.0 - self.zoom.fade_margin
        } else {
            z
        };
        self.zoom_toward(goal);
    }

    fn zoom_toward(&mut self, goal: f32) {
        self.tracks.cancel(TrackKind::SnapTo);
        self.start_track(Track::ZoomToward { goal });
    }

    /// Picks where a settled zoom should snap to
    fn on_cleanup(&mut self) {
        if self.zoom.is_snapping {
            return;
        }
        self.tracks.cancel(TrackKind::SnapTo);
        self.tracks.cancel(TrackKind::ZoomToward);

        let z = self.zoom.zoom_target;
        let sink = self.has_transition_sink();

        if z < self.zoom.fade_margin {
            let destination = if self.target.is_some()
                && z <= self.zoom.point_of_no_return_low
                && sink
            {
                0.0
            } else {
                self.zoom.fade_margin
            };
            self.on_snap_to(destination);
        } else if z > 1.0 - self.zoom.fade_margin {
            let destination = if z >= self.zoom.point_of_no_return_high && sink {
                1.0
            } else {
                1.0 - self.zoom.fade_margin
            };
            self.on_snap_to(destination);
        }
    }

    fn on_snap_to(&mut self, goal: f32) {
        if goal == 0.0 {
            self.zoom.is_snapping = true;
            if self.target.is_none() {
                error!("Starting zoom-in without a target");
            }
            self.bus.publish(HyperzoomEvent::ZoomInStarted(self.target));
        } else if goal == 1.0 {
            self.zoom.is_snapping = true;
            self.bus.publish(HyperzoomEvent::ZoomOutStarted);
        }
        debug!(goal, terminal = self.zoom.is_snapping, "Snapping zoom");
        self.start_track(Track::SnapTo { goal });
    }

    fn on_rotate(&mut self, delta: Vec2) {
        if self.locked("rotate") {
            return;
        }
        self.tracks.cancel(TrackKind::RotateReset);
        self.camera.rotate_by(
            delta.x * self.rotation_speed,
            delta.y * self.rotation_speed,
            self.pitch_clamp,
        );
    }

    fn on_change_focus(&mut self, entity: Option<EntityId>) {
        if self.locked("change_focus") {
            return;
        }
        match entity {
            Some(entity) => {
                if !self.registry.is_target(entity) {
                    trace!(?entity, "Ignoring focus on a non-target");
                    return;
                }
                if self.target == Some(entity) {
                    return;
                }
                self.select(Some(entity));
            }
            None => {
                self.on_reset_perspective();
                if self.registry.target_count() > 1 {
                    self.select(None);
                }
            }
        }
    }

    fn select(&mut self, target: Option<EntityId>) {
        debug!(
            target = ?target.and_then(|t| self.registry.name_of(t)),
            "Focus changed"
        );
        self.target = target;
        self.write_opacities();
    }

    /// Index of the current target, -1 for none
    fn current_index(&self) -> isize {
        self.target
            .and_then(|t| self.registry.index_of(t))
            .map_or(-1, |i| i as isize)
    }

    fn select_index(&mut self, index: isize) {
        let target = usize::try_from(index)
            .ok()
            .and_then(|i| self.registry.targets().get(i).copied());
        if target.is_none() {
            self.select(None);
            self.on_reset_perspective();
        } else {
            self.select(target);
        }
    }

    fn on_select_next(&mut self) {
        if self.locked("select_next") {
            return;
        }
        let count = self.registry.target_count() as isize;
        if count > 0 {
            let current = self.current_index();
            let next = if current >= count - 1 {
                if count > 1 { -1 } else { 0 }
            } else {
                current + 1
            };
            self.select_index(next);
        }
        self.on_set_xray(true);
    }

    fn on_select_previous(&mut self) {
        if self.locked("select_previous") {
            return;
        }
        let count = self.registry.target_count() as isize;
        if count > 0 {
            let current = self.current_index();
            let previous = match current {
                -1 => count - 1,
                0 if count > 1 => -1,
                0 => 0,
                i => i - 1,
            };
            self.select_index(previous);
        }
        self.on_set_xray(true);
    }

    fn cancel_reset_perspective(&mut self) {
        self.tracks.cancel(TrackKind::RotateReset);
        self.tracks.cancel(TrackKind::ZoomToward);
    }

    fn on_reset_perspective(&mut self) {
        self.cancel_reset_perspective();
        self.start_track(Track::RotateReset {
            goal: self.starting_rotation,
        });
        self.zoom_toward(self.zoom.starting);
    }

    fn on_set_xray(&mut self, on: bool) {
        if self.xray.on == on {
            return;
        }
        self.xray.on = on;
        let delay = if on { self.config.xray.on_delay } else { 0.0 };
        self.start_track(Track::Xray { delay });
    }

    fn on_touch_changed(&mut self, count: usize, previous: usize) {
        if previous == 0 && count == 1 && !self.xray.on {
            self.on_set_xray(true);
        } else if count > 1 && self.xray.on {
            self.on_set_xray(false);
        } else if self.xray.on && count == 0 {
            self.on_set_xray(false);
        }
    }

    fn on_dragged(&mut self) {
        if self.xray.on {
            self.on_set_xray(false);
        }
    }

    // ---------------------------------------------------------------------
    // Direct entry points
    // ---------------------------------------------------------------------

    /// Continuous zoom by `delta` (positive zooms out)
    pub fn zoom(&mut self, delta: f32) {
        self.dispatch(HyperzoomEvent::Zoom(delta));
    }

    /// Discrete step toward the zoomed-in end
    pub fn zoom_in(&mut self) {
        self.dispatch(HyperzoomEvent::ZoomIn);
    }

    /// Discrete step toward the zoomed-out end
    pub fn zoom_out(&mut self) {
        self.dispatch(HyperzoomEvent::ZoomOut);
    }

    /// Settle a finished zoom gesture
    pub fn cleanup(&mut self) {
        self.dispatch(HyperzoomEvent::FinishZoom);
    }

    /// Animate the zoom value to `goal`; 0 and 1 start a scene transition
    pub fn snap_to(&mut self, goal: f32) {
        if !self.active {
            return;
        }
        self.tracks.cancel(TrackKind::ZoomToward);
        self.on_snap_to(goal);
        self.pump();
    }

    /// Orbit the rig by a drag delta in pixels
    pub fn rotate(&mut self, delta: Vec2) {
        self.dispatch(HyperzoomEvent::Rotate {
            entity: None,
            delta,
        });
    }

    /// Select `entity`, or clear the selection and reset the perspective
    pub fn change_focus(&mut self, entity: Option<EntityId>) {
        self.dispatch(HyperzoomEvent::Clicked(entity));
    }

    pub fn select_next(&mut self) {
        self.dispatch(HyperzoomEvent::SelectNext);
    }

    pub fn select_previous(&mut self) {
        self.dispatch(HyperzoomEvent::SelectPrevious);
    }

    /// Animate rotation and zoom back to their starting values
    pub fn reset_perspective(&mut self) {
        if self.active {
            self.on_reset_perspective();
            self.pump();
        }
    }

    pub fn set_xray(&mut self, on: bool) {
        if self.active {
            self.on_set_xray(on);
            self.pump();
        }
    }

    pub fn toggle_xray(&mut self) {
        self.set_xray(!self.xray.on);
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn zoom_target(&self) -> f32 {
        self.zoom.zoom_target
    }

    pub fn zoom_state(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn is_snapping(&self) -> bool {
        self.zoom.is_snapping
    }

    /// Currently selected target
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn xray_on(&self) -> bool {
        self.xray.on
    }

    pub fn xray_opacity(&self) -> f32 {
        self.xray.opacity
    }

    pub fn fade_level(&self) -> f32 {
        self.fade_level
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn registry(&self) -> &FocusRegistry {
        &self.registry
    }

    pub fn tracks(&self) -> &TrackSlots {
        &self.tracks
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
