use super::*;

use crate::{
    effects::config::TransformOptions,
    foundation::color::Rgba8,
    foundation::core::{Point, SurfaceSize, Vec2},
    render::context::MeasureContext,
};

fn ctx() -> MeasureContext {
    MeasureContext::new(SurfaceSize::default())
}

fn full_config() -> EffectsConfig {
    EffectsConfig::default()
        .with_transform(TransformOptions {
            scale_x: Some(2.0),
            scale_y: Some(0.5),
            translate_x: Some(4.0),
            translate_y: Some(8.0),
            rotate: Some(0.3),
        })
        .with_filter("opacity(50%)")
}

#[test]
fn registry_order_is_transform_then_filter() {
    let p = EffectPipeline::builtin();
    assert_eq!(p.ids().collect::<Vec<_>>(), EffectId::ALL.to_vec());
}

#[test]
fn effect_by_id_fails_loudly_on_unknown() {
    let p = EffectPipeline::builtin();
    assert_eq!(p.effect_by_id("filter").unwrap().id(), EffectId::Filter);
    let err = p.effect_by_id("sparkle").err().unwrap();
    assert!(err.is_unknown_identifier());
}

#[test]
fn extract_transform_of_empty_config_is_identity() {
    let p = EffectPipeline::builtin();
    let mut c = ctx();
    assert_eq!(
        p.extract_transform(&EffectsConfig::default(), &mut c),
        Affine::IDENTITY
    );
}

#[test]
fn extract_transform_matches_what_draw_sees() {
    let p = EffectPipeline::builtin();
    let config = full_config();
    let mut c = ctx();
    let extracted = p.extract_transform(&config, &mut c);
    let seen = p.apply(&config, &mut c, |ctx| {
        assert_eq!(ctx.state().filter, "opacity(50%)");
        ctx.transform()
    });
    assert_eq!(extracted, seen);
    let origin = extracted * Point::ORIGIN;
    assert!((origin - Point::new(132.0, 136.0)).hypot() < 1e-9);
}

#[test]
fn apply_round_trips_state_even_when_callback_misbehaves() {
    let p = EffectPipeline::builtin();
    let mut c = ctx();
    c.translate(Vec2::new(3.0, 3.0));
    c.save();
    let before = c.state().clone();
    let before_depth = c.depth();

    for config in [EffectsConfig::default(), full_config()] {
        p.apply(&config, &mut c, |ctx| {
            ctx.set_fill(Rgba8::opaque(9, 9, 9));
            ctx.save();
            ctx.rotate(1.0);
            ctx.save();
            ctx.set_filter("blur(1px)");
        });
        assert_eq!(c.state(), &before);
        assert_eq!(c.depth(), before_depth);
    }
}

#[test]
fn callback_cannot_restore_the_callers_saved_states() {
    let p = EffectPipeline::builtin();
    let mut c = ctx();
    c.translate(Vec2::new(3.0, 3.0));
    c.save();
    c.translate(Vec2::new(7.0, 7.0));
    let before = c.state().clone();
    let before_depth = c.depth();

    for config in [EffectsConfig::default(), full_config()] {
        let inner = p.apply(&config, &mut c, |ctx| {
            let drawn_with = ctx.transform();
            ctx.restore();
            ctx.restore();
            ctx.restore_to(0);
            assert_eq!(ctx.transform(), drawn_with);
            ctx.transform()
        });
        assert_eq!(inner, p.extract_transform(&config, &mut ctx_at(&before)));
        assert_eq!(c.state(), &before);
        assert_eq!(c.depth(), before_depth);
    }
}

fn ctx_at(state: &crate::render::context::DrawState) -> MeasureContext {
    let mut c = ctx();
    *c.state_mut() = state.clone();
    c
}

#[test]
fn malformed_options_apply_defaults() {
    let p = EffectPipeline::builtin();
    let config: EffectsConfig =
        serde_json::from_value(serde_json::json!({"transform": {"scaleX": "wide", "rotate": null}}))
            .unwrap();
    let mut c = ctx();
    assert_eq!(
        p.extract_transform(&config, &mut c),
        Affine::translate((128.0, 128.0))
    );
}
