use super::*;

use crate::{
    effects::config::TransformOptions,
    foundation::core::{Affine, Point},
    render::context::MeasureContext,
};

fn ctx() -> MeasureContext {
    MeasureContext::new(SurfaceSize::new(200, 100).unwrap())
}

#[test]
fn translates_about_center_then_rotates_then_scales() {
    let mut c = ctx();
    let config = EffectsConfig::default().with_transform(TransformOptions {
        scale_x: Some(2.0),
        scale_y: Some(3.0),
        translate_x: Some(10.0),
        translate_y: Some(-5.0),
        rotate: Some(std::f64::consts::FRAC_PI_2),
    });
    let _undo = TransformEffect.apply(&config, &mut c);
    let expected = Affine::translate((100.0, 50.0))
        * Affine::translate((10.0, -5.0))
        * Affine::rotate(std::f64::consts::FRAC_PI_2)
        * Affine::scale_non_uniform(2.0, 3.0);
    let p = c.transform() * Point::new(1.0, 1.0);
    let q = expected * Point::new(1.0, 1.0);
    assert!((p - q).hypot() < 1e-9);
}

#[test]
fn missing_fields_default() {
    let mut c = ctx();
    let config = EffectsConfig::default().with_transform(TransformOptions::default());
    let undo = TransformEffect.apply(&config, &mut c);
    assert_eq!(c.transform(), Affine::translate((100.0, 50.0)));
    undo(&mut c);
    assert_eq!(c.transform(), Affine::IDENTITY);
}

#[test]
fn effective_parameters_for_unconfigured_layer_cancel_centering() {
    let size = SurfaceSize::new(200, 100).unwrap();
    let t = TransformEffect::effective(&EffectsConfig::default(), size);
    assert_eq!((t.translate_x, t.translate_y), (-100.0, -50.0));
    assert_eq!((t.scale_x, t.scale_y, t.rotate), (1.0, 1.0, 0.0));

    let configured = EffectsConfig::default().with_transform(TransformOptions {
        rotate: Some(0.5),
        ..Default::default()
    });
    let t = TransformEffect::effective(&configured, size);
    assert_eq!((t.translate_x, t.rotate), (0.0, 0.5));
}
