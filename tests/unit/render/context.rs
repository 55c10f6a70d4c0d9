use super::*;

use crate::foundation::core::Point;

fn ctx() -> MeasureContext {
    MeasureContext::new(SurfaceSize::default())
}

#[test]
fn operations_post_multiply_like_a_canvas() {
    let mut c = ctx();
    c.translate(Vec2::new(10.0, 0.0));
    c.scale(2.0, 2.0);
    assert_eq!(c.transform() * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
}

#[test]
fn save_restore_round_trips_all_state() {
    let mut c = ctx();
    let before = c.state().clone();
    c.save();
    c.rotate(1.0);
    c.set_filter("blur(2px)");
    c.set_fill(Rgba8::opaque(1, 2, 3));
    assert_eq!(c.depth(), 1);
    c.restore();
    assert_eq!(c.state(), &before);
    assert_eq!(c.depth(), 0);
}

#[test]
fn restore_on_empty_stack_is_noop() {
    let mut c = ctx();
    c.translate(Vec2::new(1.0, 1.0));
    let t = c.transform();
    c.restore();
    assert_eq!(c.transform(), t);
}

#[test]
fn restore_to_unwinds_unbalanced_saves() {
    let mut c = ctx();
    c.save();
    c.save();
    c.save();
    c.restore_to(1);
    assert_eq!(c.depth(), 1);
    c.restore_to(5);
    assert_eq!(c.depth(), 1);
}
