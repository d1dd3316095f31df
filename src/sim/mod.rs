//! Host clock and simulation lifecycle
//!
//! The [`World`] drives two clocks: a frame clock that ticks once per call
//! and a fixed-step clock fed from an accumulator, so fixed work stays in
//! lockstep with simulated time regardless of frame rate.

use std::any::Any;

use tracing::{error, warn};

use crate::error::Result;

/// Fixed steps one frame may run before the backlog is dropped
const MAX_FIXED_STEPS_PER_TICK: u32 = 8;

/// Trait that every hosted simulation implements
///
/// Each simulation is responsible for its own state and logic; the world
/// only decides when it runs.
pub trait Simulation {
    /// Returns the name/identifier of this simulation
    fn name(&self) -> &str;

    /// Prepares the simulation to run
    ///
    /// An error leaves the simulation inactive.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Stops everything the simulation started
    fn shutdown(&mut self) {}

    /// Frame cadence update
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last tick in seconds
    fn tick(&mut self, delta_time: f32);

    /// Fixed cadence update, called `timestep` apart in simulated time
    fn fixed_tick(&mut self, _timestep: f32) {}

    /// Returns true if the simulation is currently active
    fn is_active(&self) -> bool {
        true
    }

    /// Allows downcasting to concrete types for specific operations
    fn as_any(&self) -> &dyn Any;

    /// Mutable version of as_any for type-safe mutable access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Host clock owning every simulation
pub struct World {
    /// Total number of frame ticks elapsed
    tick_count: u64,
    /// Total number of fixed steps elapsed
    fixed_tick_count: u64,
    /// Total simulation time elapsed in seconds
    sim_time: f64,
    /// Time scale multiplier (1.0 = normal speed, 0.0 = frozen, 2.0 = 2x speed)
    time_scale: f32,
    /// Seconds per fixed step
    fixed_timestep: f32,
    /// Accumulator for fixed timestep simulation
    timestep_accumulator: f32,
    /// Whether the simulation is paused
    paused: bool,
    simulations: Vec<Box<dyn Simulation>>,
}

impl World {
    /// Creates a new world with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the fixed step length
    pub fn with_fixed_timestep(mut self, timestep: f32) -> Self {
        self.fixed_timestep = timestep.max(f32::EPSILON);
        self
    }

    /// Builder method to set the time scale
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Builder method to set the paused state
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Advances the world by one frame
    ///
    /// Runs the frame tick of every active simulation, then as many fixed
    /// steps as the accumulator holds.
    pub fn tick(&mut self, delta_time: f32) {
        if self.paused {
            return;
        }

        let scaled_delta = delta_time * self.time_scale;
        self.tick_count += 1;
        self.sim_time += f64::from(scaled_delta);
        self.timestep_accumulator += scaled_delta;

        for sim in &mut self.simulations {
            if sim.is_active() {
                sim.tick(scaled_delta);
            }
        }

        let mut steps = 0;
        while self.timestep_accumulator >= self.fixed_timestep {
            if steps == MAX_FIXED_STEPS_PER_TICK {
                warn!(
                    backlog = self.timestep_accumulator,
                    "Fixed step backlog dropped"
                );
                self.timestep_accumulator = 0.0;
                break;
            }
            self.consume_timestep(self.fixed_timestep);
            self.fixed_tick_count += 1;
            steps += 1;

            let timestep = self.fixed_timestep;
            for sim in &mut self.simulations {
                if sim.is_active() {
                    sim.fixed_tick(timestep);
                }
            }
        }
    }

    /// Returns the current tick count
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns the number of fixed steps run
    pub fn fixed_tick_count(&self) -> u64 {
        self.fixed_tick_count
    }

    /// Returns the total simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Sets the time scale multiplier
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Returns the current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Pauses the simulation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the simulation
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggles pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Returns whether the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the timestep accumulator value
    pub fn timestep_accumulator(&self) -> f32 {
        self.timestep_accumulator
    }

    /// Consumes a fixed timestep from the accumulator
    pub fn consume_timestep(&mut self, timestep: f32) {
        self.timestep_accumulator -= timestep;
    }

    /// Initializes and adds a simulation
    ///
    /// A simulation that fails to initialize is still added, but stays
    /// inactive; the error is logged and returned.
    pub fn add_simulation(&mut self, mut sim: Box<dyn Simulation>) -> Result<()> {
        let result = sim.initialize();
        if let Err(e) = &result {
            error!(simulation = sim.name(), error = %e, "Simulation failed to initialize");
        }
        self.simulations.push(sim);
        result
    }

    /// Returns a reference to all simulations
    pub fn simulations(&self) -> &[Box<dyn Simulation>] {
        &self.simulations
    }

    /// Gets a reference to a specific simulation by name
    pub fn get_simulation(&self, name: &str) -> Option<&dyn Simulation> {
        self.simulations
            .iter()
            .find(|s| s.name() == name)
            .map(|s| &**s)
    }

    /// Gets a mutable reference to a specific simulation by name
    pub fn get_simulation_mut(&mut self, name: &str) -> Option<&mut Box<dyn Simulation>> {
        self.simulations.iter_mut().find(|s| s.name() == name)
    }

    /// Gets a typed reference to a specific simulation
    ///
    /// # Example
    /// ```ignore
    /// if let Some(hz) = world.get_simulation_typed::<Hyperzoom>("hyperzoom") {
    ///     println!("{}", hz.zoom_target());
    /// }
    /// ```
    pub fn get_simulation_typed<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get_simulation(name)
            .and_then(|s| s.as_any().downcast_ref::<T>())
    }

    /// Gets a mutable typed reference to a specific simulation
    pub fn get_simulation_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_simulation_mut(name)
            .and_then(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// Shuts down every simulation
    pub fn shutdown_all(&mut self) {
        for sim in &mut self.simulations {
            sim.shutdown();
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            tick_count: 0,
            fixed_tick_count: 0,
            sim_time: 0.0,
            time_scale: 1.0,
            fixed_timestep: 0.02,
            timestep_accumulator: 0.0,
            paused: false,
            simulations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HyperzoomError;

    #[derive(Default)]
    struct Counter {
        frames: u32,
        fixed: u32,
        fail: bool,
        active: bool,
        shut_down: bool,
    }

    impl Simulation for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn initialize(&mut self) -> Result<()> {
            if self.fail {
                return Err(HyperzoomError::MissingCamera);
            }
            self.active = true;
            Ok(())
        }

        fn shutdown(&mut self) {
            self.shut_down = true;
        }

        fn tick(&mut self, _delta_time: f32) {
            self.frames += 1;
        }

        fn fixed_tick(&mut self, _timestep: f32) {
            self.fixed += 1;
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_fixed_steps_follow_accumulator() {
        let mut world = World::new().with_fixed_timestep(0.25);
        world.add_simulation(Box::new(Counter::default())).unwrap();

        world.tick(0.625);
        let counter = world.get_simulation_typed::<Counter>("counter").unwrap();
        assert_eq!(counter.frames, 1);
        assert_eq!(counter.fixed, 2);
        assert_eq!(world.timestep_accumulator(), 0.125);

        world.tick(0.125);
        let counter = world.get_simulation_typed::<Counter>("counter").unwrap();
        assert_eq!(counter.fixed, 3);
        assert_eq!(world.fixed_tick_count(), 3);
    }

    #[test]
    fn test_paused_world_does_not_tick() {
        let mut world = World::new().with_paused(true);
        world.add_simulation(Box::new(Counter::default())).unwrap();
        world.tick(1.0);
        assert_eq!(world.tick_count(), 0);

        world.resume();
        world.set_time_scale(0.5);
        world.tick(0.1);
        assert!((world.sim_time() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_long_frame_drops_backlog() {
        let mut world = World::new().with_fixed_timestep(0.01);
        world.add_simulation(Box::new(Counter::default())).unwrap();
        world.tick(1.0);
        let counter = world.get_simulation_typed::<Counter>("counter").unwrap();
        assert_eq!(counter.fixed, MAX_FIXED_STEPS_PER_TICK);
        assert_eq!(world.timestep_accumulator(), 0.0);
    }

    #[test]
    fn test_failed_initialize_stays_inactive() {
        let mut world = World::new();
        let failing = Counter {
            fail: true,
            ..Counter::default()
        };
        assert!(world.add_simulation(Box::new(failing)).is_err());

        world.tick(0.1);
        let counter = world.get_simulation_typed::<Counter>("counter").unwrap();
        assert_eq!(counter.frames, 0);
        assert_eq!(counter.fixed, 0);

        world.shutdown_all();
        let counter = world.get_simulation_typed::<Counter>("counter").unwrap();
        assert!(counter.shut_down);
    }
}
