use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba8::parse_css("#ff0000").unwrap(), Rgba8::opaque(255, 0, 0));
    assert_eq!(Rgba8::parse_css("#0f0").unwrap(), Rgba8::opaque(0, 255, 0));
    assert_eq!(
        Rgba8::parse_css(" #0000ff80 ").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 128
        }
    );
}

#[test]
fn parses_keywords_case_insensitively() {
    assert_eq!(Rgba8::parse_css("White").unwrap(), Rgba8::opaque(255, 255, 255));
    assert_eq!(Rgba8::parse_css("transparent").unwrap(), Rgba8::TRANSPARENT);
}

#[test]
fn rejects_garbage() {
    assert!(Rgba8::parse_css("#12").is_err());
    assert!(Rgba8::parse_css("#gg0000").is_err());
    assert!(Rgba8::parse_css("rebeccapurple").is_err());
}

#[test]
fn opacity_scales_alpha_only() {
    let c = Rgba8::opaque(10, 20, 30).with_opacity(0.5);
    assert_eq!((c.r, c.g, c.b, c.a), (10, 20, 30, 128));
    assert_eq!(Rgba8::BLACK.with_opacity(f64::NAN), Rgba8::BLACK);
}
