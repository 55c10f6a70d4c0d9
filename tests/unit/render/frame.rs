use super::*;

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    assert_eq!(frame.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 1), None);
}

#[test]
fn straight_alpha_unpremultiplies() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 0, 128, 128, 10, 20, 30, 0],
        premultiplied: true,
    };
    let straight = frame.to_straight_alpha();
    assert!(!straight.premultiplied);
    assert_eq!(straight.pixel(0, 0), Some([128, 0, 255, 128]));
    assert_eq!(straight.pixel(1, 0), Some([10, 20, 30, 0]));
}
