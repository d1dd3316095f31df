//! Main application handler for the demo host

use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use super::window::{status_title, window_attributes_from_config};
use crate::bus::SubscriptionId;
use crate::config::HyperzoomConfig;
use crate::hyperzoom::{Hyperzoom, demo_scene};
use crate::input::{InputCollector, KeyCode};
use crate::sim::World;
use crate::transition::{RecordingSink, TransitionSignal};

const SIMULATION: &str = "hyperzoom";

/// Demo host application
pub struct App {
    config: HyperzoomConfig,
    window: Option<Window>,
    world: World,
    input: InputCollector,
    last_update: Option<Instant>,
    /// Sink of the current controller, if it initialized
    sink: Option<SubscriptionId>,
    title: String,
}

impl App {
    /// Creates the host with a demo scene of `targets` houses
    pub fn new(config: HyperzoomConfig, targets: usize) -> Self {
        info!(profile = %config.profile, targets, "Starting hyperzoom");
        info!(?config.window, "Window configuration");

        let scene = demo_scene(&config, targets);
        let simulation: Hyperzoom =
            Hyperzoom::new(scene, &config, config.window.width as f32);
        let mut world = World::new().with_fixed_timestep(config.timing.fixed_timestep);
        let initialized = world.add_simulation(Box::new(simulation)).is_ok();

        let mut app = Self {
            window: None,
            world,
            input: InputCollector::new(),
            last_update: None,
            sink: None,
            title: String::new(),
            config,
        };
        if initialized {
            app.attach_sink();
        }
        app
    }

    fn simulation_mut(&mut self) -> Option<&mut Hyperzoom> {
        self.world.get_simulation_typed_mut::<Hyperzoom>(SIMULATION)
    }

    fn simulation(&self) -> Option<&Hyperzoom> {
        self.world.get_simulation_typed::<Hyperzoom>(SIMULATION)
    }

    fn attach_sink(&mut self) {
        self.sink = self
            .simulation_mut()
            .and_then(|hz| hz.attach_transition_sink(RecordingSink::default()));
    }

    /// Feeds collected input into the simulation; false once the user asked to quit
    fn feed_input(&mut self) -> bool {
        let pointer_events = self.input.drain_pointer_events();
        let keys = self.input.drain_key_presses();
        let controller_state = *self.input.controller_state();
        self.input.advance_frame();

        if keys.contains(&KeyCode::Escape) {
            return false;
        }
        if let Some(hz) = self.simulation_mut() {
            for event in pointer_events {
                hz.handle_pointer(event);
            }
            for key in keys {
                hz.handle_key(key);
            }
            hz.set_controller_state(controller_state);
        }
        true
    }

    /// Reloads the scene once a transition has finished
    fn settle_transitions(&mut self) {
        let Some(sink) = self.sink else {
            return;
        };
        let finished = self
            .simulation_mut()
            .and_then(|hz| hz.controller_mut())
            .and_then(|c| c.transition_sink_mut::<RecordingSink>(sink))
            .and_then(|recording| {
                let finished = recording.signals.iter().copied().find(|signal| {
                    matches!(
                        signal,
                        TransitionSignal::ZoomInFinished(_) | TransitionSignal::ZoomOutFinished
                    )
                });
                recording.signals.clear();
                finished
            });
        let Some(signal) = finished else {
            return;
        };

        let Some(hz) = self.simulation_mut() else {
            return;
        };
        if let TransitionSignal::ZoomInFinished(Some(target)) = signal {
            let name = hz
                .controller()
                .and_then(|c| c.registry().name_of(target))
                .unwrap_or("unknown")
                .to_string();
            info!(target = %name, "Entered target, reloading scene");
        } else {
            info!(?signal, "Left scene, reloading");
        }

        match hz.reload() {
            Ok(()) => self.attach_sink(),
            Err(e) => {
                error!(error = %e, "Scene reload failed");
                self.sink = None;
            }
        }
    }

    fn update_title(&mut self) {
        let title = match self.simulation().and_then(|hz| hz.controller()) {
            Some(c) => status_title(
                &self.config.window.title,
                c.zoom_target(),
                c.target().and_then(|t| c.registry().name_of(t)),
                c.xray_on(),
            ),
            None => format!("{} | inactive", self.config.window.title),
        };
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn resize(&mut self, width: u32) {
        let scale = self
            .window
            .as_ref()
            .map(|w| w.scale_factor() as f32)
            .unwrap_or(1.0);
        let logical = width as f32 / scale;
        if let Some(hz) = self.simulation_mut() {
            hz.set_viewport_width(logical);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );
                self.input.set_scale_factor(window.scale_factor() as f32);
                self.window = Some(window);
                self.resize(size.width);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        let delta_time = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        // Input goes in before the simulation steps
        if !self.feed_input() {
            info!("Escape pressed, exiting");
            self.world.shutdown_all();
            event_loop.exit();
            return;
        }

        self.world.tick(delta_time);
        self.settle_transitions();
        self.update_title();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                self.world.shutdown_all();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.input.set_scale_factor(scale_factor as f32);
                if let Some(window) = &self.window {
                    let width = window.inner_size().width;
                    self.resize(width);
                }
            }
            WindowEvent::Focused(false) => {
                warn!("Window lost focus, releasing all contacts");
            }
            _ => {}
        }
    }
}
