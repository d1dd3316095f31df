//! End-to-end input flows: raw pointer and key input through the gesture
//! tracker and alternate mapper into the controller, driven by the world clock

use glam::Vec2;

use hyperzoom::input::{ButtonState, ControllerState, PointerEvent, PointerId};
use hyperzoom::scene::{EntityId, SceneGraph};
use hyperzoom::sim::World;
use hyperzoom::transition::{RecordingSink, TransitionSignal};
use hyperzoom::{Hyperzoom, HyperzoomConfig};

const STEP: f32 = 0.02;

fn world(targets: usize) -> World {
    let config = HyperzoomConfig::default();
    let mut world = World::new().with_fixed_timestep(STEP);
    let simulation: Hyperzoom = Hyperzoom::new(SceneGraph::demo(targets), &config, 1000.0);
    world.add_simulation(Box::new(simulation)).unwrap();
    world
}

fn hz(world: &mut World) -> &mut Hyperzoom {
    world
        .get_simulation_typed_mut::<Hyperzoom>("hyperzoom")
        .unwrap()
}

fn run(world: &mut World, ticks: usize) {
    for _ in 0..ticks {
        world.tick(STEP);
    }
}

fn down(id: u64, x: f32, hit: Option<EntityId>) -> PointerEvent {
    PointerEvent::Down {
        id: PointerId(id),
        position: Vec2::new(x, 0.0),
        hit,
    }
}

fn up(id: u64, x: f32) -> PointerEvent {
    PointerEvent::Up {
        id: PointerId(id),
        position: Vec2::new(x, 0.0),
    }
}

#[test]
fn test_drag_orbits_the_rig() {
    let mut world = world(2);
    let sim = hz(&mut world);
    sim.handle_pointer(down(0, 100.0, None));
    sim.handle_pointer(PointerEvent::Move {
        id: PointerId::MOUSE,
        position: Vec2::new(200.0, 0.0),
        delta: Vec2::new(100.0, 0.0),
    });
    sim.handle_pointer(up(0, 200.0));
    run(&mut world, 1);

    let controller = hz(&mut world).controller().unwrap();
    let (yaw, pitch) = controller.camera().yaw_pitch();
    // 500 degrees per 1000px viewport
    assert!((yaw - 50.0).abs() < 0.1, "yaw {yaw}");
    assert!((pitch - 30.0).abs() < 0.1, "pitch {pitch}");
    // A drag is never a click
    assert_eq!(controller.target(), None);
}

#[test]
fn test_pinch_release_bounces_back_to_the_margin() {
    let mut world = world(2);
    let sim = hz(&mut world);
    sim.handle_pointer(down(1, 0.0, None));
    sim.handle_pointer(down(2, 1000.0, None));
    run(&mut world, 1);

    // Close the pinch 100px at a time
    for step in 1..=9 {
        let x = step as f32 * 100.0;
        hz(&mut world).handle_pointer(PointerEvent::Move {
            id: PointerId(1),
            position: Vec2::new(x, 0.0),
            delta: Vec2::new(100.0, 0.0),
        });
        run(&mut world, 1);
    }
    let pinched = hz(&mut world).zoom_target();
    assert!(pinched > 0.75 && pinched < 0.875, "zoom {pinched}");

    let sim = hz(&mut world);
    sim.handle_pointer(up(2, 1000.0));
    sim.handle_pointer(up(1, 900.0));
    run(&mut world, 200);

    let controller = hz(&mut world).controller().unwrap();
    assert_eq!(controller.zoom_target(), 0.75);
    assert!(!controller.is_snapping());
}

#[test]
fn test_arrow_keys_zoom_out_of_the_scene() {
    let mut world = world(2);
    let sink = hz(&mut world)
        .attach_transition_sink(RecordingSink::default())
        .unwrap();

    let press_down = |world: &mut World| {
        let mut state = ControllerState::new();
        state.arrows.down = ButtonState::from_pressed(true);
        hz(world).set_controller_state(state);
        run(world, 1);
        hz(world).set_controller_state(ControllerState::new());
        run(world, 100);
    };

    press_down(&mut world);
    assert_eq!(hz(&mut world).zoom_target(), 0.75);

    press_down(&mut world);
    let controller = hz(&mut world).controller_mut().unwrap();
    assert_eq!(controller.zoom_target(), 1.0);
    assert!(controller.is_snapping());
    let signals = controller
        .transition_sink_mut::<RecordingSink>(sink)
        .map(|s| s.signals.clone())
        .unwrap();
    assert_eq!(
        signals,
        vec![
            TransitionSignal::ZoomOutStarted,
            TransitionSignal::ZoomOutFinished
        ]
    );
}

#[test]
fn test_long_press_on_background_keeps_selection() {
    let mut world = world(2);
    let target = hz(&mut world).controller().unwrap().registry().targets()[1];

    hz(&mut world).handle_pointer(down(0, 10.0, Some(target)));
    hz(&mut world).handle_pointer(up(0, 10.0));
    run(&mut world, 1);
    assert_eq!(hz(&mut world).controller().unwrap().target(), Some(target));

    hz(&mut world).handle_pointer(down(0, 10.0, None));
    run(&mut world, 40);
    hz(&mut world).handle_pointer(up(0, 10.0));
    run(&mut world, 1);
    assert_eq!(hz(&mut world).controller().unwrap().target(), Some(target));

    // A quick background click clears it
    hz(&mut world).handle_pointer(down(0, 10.0, None));
    hz(&mut world).handle_pointer(up(0, 10.0));
    run(&mut world, 1);
    assert_eq!(hz(&mut world).controller().unwrap().target(), None);
}
