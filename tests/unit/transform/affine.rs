use super::*;

#[test]
fn compose_is_left_to_right_matrix_product() {
    let t = Affine::translate((10.0, 0.0));
    let s = Affine::scale(2.0);
    assert_eq!(compose(t, s) * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
    assert_eq!(compose(s, t) * Point::new(1.0, 1.0), Point::new(22.0, 2.0));
    assert_eq!(compose(Affine::IDENTITY, t), t);
}

#[test]
fn apply_vector_ignores_translation() {
    let t = Affine::translate((100.0, 50.0)) * Affine::scale_non_uniform(2.0, 3.0);
    assert_eq!(apply_vector(t, Vec2::new(1.0, 1.0)), Vec2::new(2.0, 3.0));
    assert_eq!(apply_point(t, Point::new(1.0, 1.0)), Point::new(102.0, 53.0));
}

#[test]
fn checked_inverse_rejects_singular() {
    assert!(checked_inverse(Affine::scale_non_uniform(0.0, 1.0)).is_none());
    assert!(checked_inverse(Affine::new([f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0])).is_none());
    let inv = checked_inverse(Affine::scale(4.0)).unwrap();
    assert_eq!(inv * Point::new(8.0, 4.0), Point::new(2.0, 1.0));
}

#[test]
fn scaled_distance_tracks_scale_not_translation_or_rotation() {
    assert_eq!(scaled_distance(16.0, Affine::IDENTITY), 16.0);
    assert_eq!(scaled_distance(16.0, Affine::translate((5.0, 5.0))), 16.0);
    assert!((scaled_distance(16.0, Affine::scale(0.5)) - 8.0).abs() < 1e-12);
    let rotated = Affine::rotate(1.0) * Affine::scale(2.0);
    assert!((scaled_distance(10.0, rotated) - 20.0).abs() < 1e-9);
}
