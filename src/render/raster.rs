//! Pixel surface backed by `vello_cpu`.

use std::sync::Arc;

use crate::{
    effects::filter::filter_opacity,
    foundation::core::{Affine, Rect, SurfaceSize},
    foundation::error::{LayerkitError, LayerkitResult},
    plugins::image::PreparedImage,
    render::{
        FrameRGBA,
        context::{DrawContext, DrawState, StateStack},
    },
};

pub struct RasterContext {
    size: SurfaceSize,
    width: u16,
    height: u16,
    stack: StateStack,
    ctx: vello_cpu::RenderContext,
}

impl std::fmt::Debug for RasterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterContext")
            .field("size", &self.size)
            .field("depth", &self.stack.depth())
            .finish()
    }
}

impl RasterContext {
    pub fn new(size: SurfaceSize) -> LayerkitResult<Self> {
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| LayerkitError::render("surface width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| LayerkitError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(LayerkitError::render("surface size must be non-zero"));
        }
        Ok(Self {
            size,
            width,
            height,
            stack: StateStack::default(),
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    /// Rasterize everything drawn so far and read it back.
    pub fn finish(mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn begin_draw(&mut self, transform: Affine) {
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
    }
}

impl DrawContext for RasterContext {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn state(&self) -> &DrawState {
        self.stack.current()
    }

    fn state_mut(&mut self) -> &mut DrawState {
        self.stack.current_mut()
    }

    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn fill_rect(&mut self, rect: Rect) -> LayerkitResult<()> {
        let state = self.stack.current().clone();
        let color = state.fill.with_opacity(filter_opacity(&state.filter));
        self.begin_draw(state.transform);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect) -> LayerkitResult<()> {
        if image.width == 0 || image.height == 0 {
            return Ok(());
        }
        let state = self.stack.current().clone();
        let opacity = filter_opacity(&state.filter);
        let (w, h) = (f64::from(image.width), f64::from(image.height));

        let pixmap = image_premul_bytes_to_pixmap(image)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let fit = Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);
        self.begin_draw(state.transform * fit);
        self.ctx.set_paint(paint);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity as f32);
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_premul_bytes_to_pixmap(image: &PreparedImage) -> LayerkitResult<vello_cpu::Pixmap> {
    let w: u16 = image
        .width
        .try_into()
        .map_err(|_| LayerkitError::render("image width exceeds u16"))?;
    let h: u16 = image
        .height
        .try_into()
        .map_err(|_| LayerkitError::render("image height exceeds u16"))?;
    if image.rgba8_premul.len() != image.width as usize * image.height as usize * 4 {
        return Err(LayerkitError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width as usize * image.height as usize);
    for px in image.rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
