//! Per-frame simulation tick
//!
//! One tick runs to completion per display frame. Pointer intents queued
//! since the last frame are applied first, so a body is never dragged and
//! physics-stepped in the same pass. Integration is one unit step per frame
//! (velocities are in pixels per frame).

use glam::Vec2;

use super::body::MovingBody;
use super::collision::{boundary_collision, bounce_velocity};
use super::field::apply_field;
use super::state::{SimPhase, SimState};
use super::tone::{Contact, contact_frequency};
use crate::audio::ToneSink;
use crate::consts::TONE_DURATION_SECS;

/// Pointer intents in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer events since the last tick, in arrival order
    pub pointer: Vec<PointerEvent>,
    /// Start / resume the loop
    pub start: bool,
    /// Pause the loop (state kept)
    pub pause: bool,
    /// Restore starting positions and go idle
    pub reset: bool,
}

/// What happened to a body during a physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Dragged or dormant; not moved
    Skipped,
    Moved,
    Bounced(Contact),
}

/// Advance the simulation by one frame
///
/// `now` is the frame clock in seconds, used to stamp and age trails.
pub fn tick<S: ToneSink + ?Sized>(state: &mut SimState, input: &TickInput, now: f64, sink: &S) {
    if input.reset {
        state.reset();
    }
    if input.start {
        state.start();
    }
    if input.pause {
        state.pause();
    }

    for &event in &input.pointer {
        handle_pointer(state, event);
    }

    if state.phase != SimPhase::Running {
        return;
    }

    for i in 0..state.bodies.len() {
        if let StepOutcome::Bounced(contact) = step_body(state, i, now) {
            play_contact(state, i, contact, sink);
        }
    }

    if let Some(field) = &state.field {
        apply_field(field, &mut state.bodies);
    }
}

/// Move one body and resolve any wall contact
pub fn step_body(state: &mut SimState, index: usize, now: f64) -> StepOutcome {
    let boundary = state.boundary;
    let chaos = state.knobs.chaos;
    let body = &mut state.bodies[index];

    if body.dragging || body.is_dormant() {
        return StepOutcome::Skipped;
    }

    body.pos += body.vel;
    body.record_trail(now);

    let hit = boundary_collision(body.pos, body.radius, &boundary);
    if !hit.hit {
        return StepOutcome::Moved;
    }

    // Only the circle gets pushed back out; polygons just reflect
    let contact = match hit.edge {
        Some(edge) => Contact::Edge(edge),
        None => {
            body.pos -= hit.normal * hit.penetration;
            Contact::Wall { pos: body.pos }
        }
    };

    body.vel = bounce_velocity(body.vel, hit.normal, body.speed, chaos, &mut state.rng);
    StepOutcome::Bounced(contact)
}

fn play_contact<S: ToneSink + ?Sized>(state: &SimState, index: usize, contact: Contact, sink: &S) {
    let body = &state.bodies[index];
    match contact_frequency(contact, &body.tone, state.height) {
        Ok(freq) => {
            log::debug!("Body {index} hit {contact:?}: {freq:.2} Hz");
            sink.play_tone(freq, state.knobs.volume, TONE_DURATION_SECS);
        }
        Err(err) => log::warn!("Skipping tone for body {index}: {err}"),
    }
}

/// Apply one pointer intent to the drag state
pub fn handle_pointer(state: &mut SimState, event: PointerEvent) {
    match event {
        PointerEvent::Down(p) => {
            if let Some(body) = state.bodies.iter_mut().find(|b| b.hit_test(p)) {
                body.dragging = true;
                log::debug!("Dragging body at {p}");
            } else if let Some(field) = state.field.as_mut().filter(|f| f.hit_test(p)) {
                field.dragging = true;
                log::debug!("Dragging field at {p}");
            }
        }
        PointerEvent::Move(p) => {
            for body in state.bodies.iter_mut().filter(|b| b.dragging) {
                body.pos = p;
            }
            if let Some(field) = state.field.as_mut().filter(|f| f.dragging) {
                field.pos = p;
            }
        }
        PointerEvent::Up(p) => {
            let inside = state.boundary.contains(p);
            let mut released = false;
            for body in state.bodies.iter_mut().filter(|b| b.dragging) {
                release(body, inside);
                released |= inside;
            }
            if let Some(field) = &mut state.field {
                field.dragging = false;
            }
            if released && state.phase == SimPhase::Idle {
                state.start();
            }
        }
    }
}

fn release(body: &mut MovingBody, inside: bool) {
    body.dragging = false;
    if inside {
        body.launch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EQUAL_TEMPERAMENT_HZ;
    use crate::settings::Settings;
    use crate::sim::Shape;
    use std::cell::RefCell;

    /// Records every tone instead of playing it
    #[derive(Default)]
    struct RecordingSink {
        tones: RefCell<Vec<(f32, f32, f32)>>,
    }

    impl ToneSink for RecordingSink {
        fn play_tone(&self, frequency_hz: f32, gain: f32, duration_secs: f32) {
            self.tones
                .borrow_mut()
                .push((frequency_hz, gain, duration_secs));
        }
    }

    fn running_state(chaos: f32) -> SimState {
        let mut settings = Settings::default();
        settings.knobs.chaos = chaos;
        let mut state = SimState::new(&settings);
        state.start();
        state
    }

    #[test]
    fn test_circle_bounce_scenario() {
        let mut state = running_state(0.3);
        let sink = RecordingSink::default();
        state.bodies[0].pos = Vec2::new(400.0, 670.0);
        state.bodies[0].vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default(), 0.0, &sink);

        let body = &state.bodies[0];
        assert!(body.pos.distance(state.boundary.center) + body.radius <= 300.0 + 1e-3);
        assert!(body.vel.y < 0.0);
        assert!((body.vel.length() - 5.0).abs() < 1e-4);

        let tones = sink.tones.borrow();
        assert_eq!(tones.len(), 1);
        let (freq, gain, duration) = tones[0];
        assert!(freq.is_finite());
        // Pushed back to y=672: 100 + (128/800) * 800
        assert!((freq - 228.0).abs() < 0.01);
        assert_eq!(gain, state.knobs.volume);
        assert_eq!(duration, TONE_DURATION_SECS);
    }

    #[test]
    fn test_hexagon_edge_scenario() {
        let mut state = running_state(0.0);
        state.set_shape(Shape::Hexagon);
        let sink = RecordingSink::default();
        state.bodies[0].pos = Vec2::new(400.0, 640.0);
        state.bodies[0].vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default(), 0.0, &sink);

        let body = &state.bodies[0];
        // No push-back on polygons, just the reflection
        assert_eq!(body.pos, Vec2::new(400.0, 645.0));
        assert!((body.vel - Vec2::new(0.0, -5.0)).length() < 1e-4);
        let tones = sink.tones.borrow();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].0, EQUAL_TEMPERAMENT_HZ[1]);
    }

    #[test]
    fn test_dodecagon_edges_wrap_table() {
        let mut state = running_state(0.0);
        state.set_shape(Shape::Dodecagon);
        let sink = RecordingSink::default();
        // Head straight for the middle of edge 11
        let (a, b) = state.boundary.edge(11);
        let mid = (a + b) / 2.0;
        let dir = (mid - state.boundary.center).normalize();
        state.bodies[0].pos = mid - dir * 30.0;
        state.bodies[0].vel = dir * 5.0;

        tick(&mut state, &TickInput::default(), 0.0, &sink);
        assert_eq!(sink.tones.borrow()[0].0, EQUAL_TEMPERAMENT_HZ[11]);
    }

    #[test]
    fn test_dormant_and_dragged_bodies_do_not_move() {
        let mut state = running_state(0.5);
        let sink = RecordingSink::default();
        state.bodies[1].vel = Vec2::new(2.0, 2.0);
        state.bodies[1].dragging = true;
        let before: Vec<Vec2> = state.bodies.iter().map(|b| b.pos).collect();

        for frame in 0..10 {
            tick(&mut state, &TickInput::default(), frame as f64, &sink);
        }

        let after: Vec<Vec2> = state.bodies.iter().map(|b| b.pos).collect();
        assert_eq!(before, after);
        assert!(state.bodies.iter().all(|b| b.trail.is_empty()));
        assert!(sink.tones.borrow().is_empty());
    }

    #[test]
    fn test_paused_state_is_frozen() {
        let mut state = running_state(0.0);
        let sink = RecordingSink::default();
        state.bodies[0].pos = Vec2::new(400.0, 400.0);
        state.bodies[0].vel = Vec2::new(0.0, 5.0);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 0.0, &sink);
        assert_eq!(state.phase, SimPhase::Paused);
        tick(&mut state, &TickInput::default(), 1.0, &sink);
        assert_eq!(state.bodies[0].pos, Vec2::new(400.0, 400.0));

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, 2.0, &sink);
        assert_eq!(state.phase, SimPhase::Running);
        assert_eq!(state.bodies[0].pos, Vec2::new(400.0, 405.0));
    }

    #[test]
    fn test_fresh_state_waits_for_start() {
        let mut state = SimState::new(&Settings::default());
        let sink = RecordingSink::default();
        state.bodies[0].pos = Vec2::new(400.0, 400.0);
        state.bodies[0].vel = Vec2::new(0.0, 5.0);

        for frame in 0..3 {
            tick(&mut state, &TickInput::default(), frame as f64, &sink);
        }
        assert_eq!(state.phase, SimPhase::Idle);
        assert_eq!(state.bodies[0].pos, Vec2::new(400.0, 400.0));
        assert!(sink.tones.borrow().is_empty());
    }

    #[test]
    fn test_drag_release_inside_starts_running() {
        let mut state = SimState::new(&Settings::default());
        let sink = RecordingSink::default();
        let input = TickInput {
            pointer: vec![
                PointerEvent::Down(Vec2::new(105.0, 100.0)),
                PointerEvent::Move(Vec2::new(400.0, 400.0)),
                PointerEvent::Up(Vec2::new(400.0, 400.0)),
            ],
            ..Default::default()
        };
        tick(&mut state, &input, 0.0, &sink);

        assert_eq!(state.phase, SimPhase::Running);
        // First listed body wins the grab; it stepped once after release
        assert_eq!(state.bodies[0].pos, Vec2::new(400.0, 405.0));
        assert_eq!(state.bodies[0].vel, Vec2::new(0.0, 5.0));
        assert!(!state.bodies[0].dragging);
        assert!(state.bodies[1].is_dormant());
        assert_eq!(state.bodies[1].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_release_outside_boundary_stays_dormant() {
        let mut state = SimState::new(&Settings::default());
        let sink = RecordingSink::default();
        let input = TickInput {
            pointer: vec![
                PointerEvent::Down(Vec2::new(100.0, 100.0)),
                PointerEvent::Move(Vec2::new(20.0, 780.0)),
                PointerEvent::Up(Vec2::new(20.0, 780.0)),
            ],
            ..Default::default()
        };
        tick(&mut state, &input, 0.0, &sink);

        assert_eq!(state.phase, SimPhase::Idle);
        assert_eq!(state.bodies[0].pos, Vec2::new(20.0, 780.0));
        assert!(state.bodies[0].is_dormant());
    }

    #[test]
    fn test_field_body_drag() {
        let mut state = SimState::new(&Settings::default());
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(660.0, 720.0)));
        assert!(state.field.as_ref().unwrap().dragging);
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(500.0, 500.0)));
        handle_pointer(&mut state, PointerEvent::Up(Vec2::new(500.0, 500.0)));

        let field = state.field.as_ref().unwrap();
        assert_eq!(field.pos, Vec2::new(500.0, 500.0));
        assert!(!field.dragging);
        // Moving the field does not start the loop
        assert_eq!(state.phase, SimPhase::Idle);
    }

    #[test]
    fn test_field_pushes_after_integration() {
        let mut state = running_state(0.0);
        let sink = RecordingSink::default();
        let field_pos = Vec2::new(400.0, 400.0);
        state.field.as_mut().unwrap().pos = field_pos;
        state.bodies[0].pos = Vec2::new(400.0, 435.0);
        state.bodies[0].vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default(), 0.0, &sink);

        // Moved to 440 first, then pushed 0.4 * (1 - 40/80) = 0.2 further down
        assert_eq!(state.bodies[0].pos, Vec2::new(400.0, 440.0));
        assert!((state.bodies[0].vel.y - 5.2).abs() < 1e-5);
    }

    #[test]
    fn test_reset_scenario() {
        let mut state = running_state(0.8);
        let sink = RecordingSink::default();
        for body in &mut state.bodies {
            body.pos = Vec2::new(400.0, 400.0);
            body.vel = Vec2::new(3.0, 4.0);
        }
        for frame in 0..200 {
            tick(&mut state, &TickInput::default(), frame as f64 / 60.0, &sink);
        }
        assert!(state.bodies.iter().all(|b| !b.trail.is_empty()));
        assert!(!sink.tones.borrow().is_empty());

        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &reset, 10.0, &sink);

        assert_eq!(state.phase, SimPhase::Idle);
        for body in &state.bodies {
            assert_eq!(body.pos, Vec2::new(100.0, 100.0));
            assert!(body.is_dormant());
            assert!(body.trail.is_empty());
        }
        assert_eq!(state.field.as_ref().unwrap().pos, Vec2::new(720.0, 720.0));
    }

    #[test]
    fn test_non_finite_tone_is_skipped() {
        let mut state = running_state(0.0);
        state.height = 0.0;
        let sink = RecordingSink::default();
        state.bodies[0].pos = Vec2::new(400.0, 670.0);
        state.bodies[0].vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default(), 0.0, &sink);

        // Bounce still happens, the tone does not
        assert!(state.bodies[0].vel.y < 0.0);
        assert!(sink.tones.borrow().is_empty());
    }

    #[test]
    fn test_bodies_stay_inside_circle() {
        let mut state = running_state(1.0);
        let sink = RecordingSink::default();
        state.bodies[2].pos = Vec2::new(400.0, 400.0);
        state.bodies[2].vel = Vec2::new(0.0, 5.0);
        for frame in 0..2000 {
            tick(&mut state, &TickInput::default(), frame as f64 / 60.0, &sink);
            let body = &state.bodies[2];
            assert!(body.pos.distance(state.boundary.center) + body.radius <= 300.0 + 1e-2);
            assert!((body.vel.length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = running_state(1.2);
            let sink = RecordingSink::default();
            state.bodies[0].pos = Vec2::new(400.0, 400.0);
            state.bodies[0].vel = Vec2::new(0.0, 5.0);
            for frame in 0..500 {
                tick(&mut state, &TickInput::default(), frame as f64, &sink);
            }
            (state.bodies[0].pos, sink.tones.into_inner().len())
        };
        assert_eq!(run(), run());
    }
}
