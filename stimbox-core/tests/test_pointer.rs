//! Pointer tracking state machine tests

use glam::Vec2;
use stimbox_core::pointer::{PointerEvent, PointerTracker};
use stimbox_core::tests::test_helpers::approx_eq_vec2;
use stimbox_core::viewport::Viewport;

fn viewport() -> Viewport {
    Viewport::new(20.0, 10.0, 400.0, 300.0)
}

#[test]
fn test_starts_offscreen() {
    let tracker = PointerTracker::new();
    assert!(!tracker.on_screen());
}

#[test]
fn test_mouse_move_and_out() {
    let mut tracker = PointerTracker::new();
    let vp = viewport();

    tracker.handle(PointerEvent::MouseMove(Vec2::new(50.0, 60.0)), &vp);
    assert!(tracker.on_screen());
    assert!(approx_eq_vec2(tracker.position(), Vec2::new(50.0, 60.0), 0.0));

    tracker.handle(PointerEvent::MouseOut, &vp);
    assert!(!tracker.on_screen());
}

#[test]
fn test_touch_capture_suppresses_mouse() {
    let mut tracker = PointerTracker::new();
    let vp = viewport();

    // Touch positions are client-space; (120, 80) is local (110, 60)
    tracker.handle(
        PointerEvent::TouchStart {
            id: 7,
            pos: Vec2::new(120.0, 80.0),
        },
        &vp,
    );
    assert!(tracker.on_screen());
    assert!(approx_eq_vec2(tracker.position(), Vec2::new(110.0, 60.0), 0.0));

    // Only the touch listener family is active now
    tracker.handle(PointerEvent::MouseMove(Vec2::new(1.0, 1.0)), &vp);
    tracker.handle(PointerEvent::MouseOut, &vp);
    assert!(tracker.on_screen());
    assert!(approx_eq_vec2(tracker.position(), Vec2::new(110.0, 60.0), 0.0));
}

#[test]
fn test_only_captured_touch_is_followed() {
    let mut tracker = PointerTracker::new();
    let vp = viewport();

    tracker.handle(
        PointerEvent::TouchStart {
            id: 7,
            pos: Vec2::new(120.0, 80.0),
        },
        &vp,
    );
    tracker.handle(
        PointerEvent::TouchMove {
            id: 9,
            pos: Vec2::new(400.0, 400.0),
        },
        &vp,
    );
    assert!(approx_eq_vec2(tracker.position(), Vec2::new(110.0, 60.0), 0.0));

    tracker.handle(
        PointerEvent::TouchMove {
            id: 7,
            pos: Vec2::new(130.0, 90.0),
        },
        &vp,
    );
    assert!(approx_eq_vec2(tracker.position(), Vec2::new(120.0, 70.0), 0.0));
}

#[test]
fn test_touch_end_returns_to_mouse_tracking() {
    let mut tracker = PointerTracker::new();
    let vp = viewport();

    tracker.handle(
        PointerEvent::TouchStart {
            id: 7,
            pos: Vec2::new(120.0, 80.0),
        },
        &vp,
    );
    // Some other finger lifting changes nothing
    tracker.handle(PointerEvent::TouchEnd { id: 9 }, &vp);
    assert!(tracker.on_screen());

    tracker.handle(PointerEvent::TouchEnd { id: 7 }, &vp);
    assert!(!tracker.on_screen());

    // Mouse tracking works again
    tracker.handle(PointerEvent::MouseMove(Vec2::new(5.0, 6.0)), &vp);
    assert!(tracker.on_screen());
    assert!(approx_eq_vec2(tracker.position(), Vec2::new(5.0, 6.0), 0.0));
}
