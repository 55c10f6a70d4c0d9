use super::*;

#[test]
fn contains_is_inclusive() {
    let b = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(contains(b, Point::new(0.0, 0.0)));
    assert!(contains(b, Point::new(100.0, 100.0)));
    assert!(contains(b, Point::new(50.0, 50.0)));
    assert!(!contains(b, Point::new(100.0001, 50.0)));
}

#[test]
fn contains_tolerates_swapped_corners() {
    let b = Rect::new(100.0, 100.0, 0.0, 0.0);
    assert!(contains(b, Point::new(10.0, 90.0)));
}

#[test]
fn dilate_expands_every_edge() {
    let b = dilate(Rect::new(0.0, 0.0, 10.0, 20.0), 2.0);
    assert_eq!(b, Rect::new(-2.0, -2.0, 12.0, 22.0));
    assert_eq!(center(b), Point::new(5.0, 10.0));
}

#[test]
fn corners_run_clockwise_from_top_left() {
    let c = corners(Rect::new(0.0, 0.0, 2.0, 1.0));
    assert_eq!(c[0], Point::new(0.0, 0.0));
    assert_eq!(c[1], Point::new(2.0, 0.0));
    assert_eq!(c[2], Point::new(2.0, 1.0));
    assert_eq!(c[3], Point::new(0.0, 1.0));
}
