use super::*;

use std::f64::consts::FRAC_PI_2;

#[test]
fn length_dot_cross() {
    let a = Vec2::new(3.0, 4.0);
    assert_eq!(length(a), 5.0);
    assert_eq!(dot(a, Vec2::new(1.0, 0.0)), 3.0);
    assert_eq!(cross(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)), 1.0);
    assert_eq!(subtract(Point::new(5.0, 5.0), Point::new(2.0, 1.0)), Vec2::new(3.0, 4.0));
}

#[test]
fn normalize_guards_degenerate_vectors() {
    assert!(normalize(Vec2::ZERO).is_none());
    assert!(normalize(Vec2::new(f64::NAN, 1.0)).is_none());
    let n = normalize(Vec2::new(0.0, 2.0)).unwrap();
    assert_eq!(n, Vec2::new(0.0, 1.0));
}

#[test]
fn signed_angle_has_sign_and_range() {
    let x = Vec2::new(1.0, 0.0);
    let y = Vec2::new(0.0, 1.0);
    assert!((signed_angle(x, y) - FRAC_PI_2).abs() < 1e-12);
    assert!((signed_angle(y, x) + FRAC_PI_2).abs() < 1e-12);
    assert!((signed_angle(x, Vec2::new(-1.0, 0.0)).abs() - std::f64::consts::PI).abs() < 1e-12);
}
