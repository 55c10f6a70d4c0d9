use super::*;

use std::io::Cursor;

use serde_json::json;

use crate::render::context::MeasureContext;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_premultiplies() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!((prepared.width, prepared.height), (1, 1));
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn fitted_rect_uses_shorter_surface_side() {
    let surface = SurfaceSize::new(200, 100).unwrap();
    let r = fitted_rect(50, 25, surface).unwrap();
    assert_eq!(r, Rect::new(-50.0, -25.0, 50.0, 25.0));
    assert!(fitted_rect(0, 0, surface).is_none());
}

#[tokio::test]
async fn compute_missing_src_fails() {
    let err = ImagePlugin.compute(&json!({})).await.unwrap_err();
    assert!(matches!(err, LayerkitError::Compute { ref kind, .. } if kind == "image"));
}

#[tokio::test]
async fn compute_missing_file_fails() {
    let err = ImagePlugin
        .compute(&json!({"src": "/definitely/not/here.png"}))
        .await
        .unwrap_err();
    assert!(matches!(err, LayerkitError::Compute { .. }));
}

#[tokio::test]
async fn compute_then_bbox_and_draw() {
    let dir = std::env::temp_dir().join(format!("layerkit_image_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("square.png");
    std::fs::write(&path, png_bytes(4, 4, [255, 0, 0, 255])).unwrap();

    let options = json!({"src": path.to_string_lossy()});
    let result = ImagePlugin.compute(&options).await.unwrap();
    assert!(result.has_cleanup());

    let mut ctx = MeasureContext::new(SurfaceSize::default());
    let bbox = ImagePlugin.bbox(&ctx, &options, Some(&result)).unwrap();
    assert_eq!(bbox, Rect::new(-128.0, -128.0, 128.0, 128.0));
    ImagePlugin.draw(&mut ctx, &options, Some(&result)).unwrap();
    assert!(ImagePlugin.bbox(&ctx, &options, None).is_none());

    result.run_cleanup().await;
    let _ = std::fs::remove_dir_all(&dir);
}
