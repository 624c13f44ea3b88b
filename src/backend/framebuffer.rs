use glam::Vec4;

use super::Context;

/// Accumulating color framebuffer.
///
/// Pixels are stored linear RGBA, row-major with row 0 at the bottom of
/// the image. Each finished pass is blended in with weight 1/k so the
/// buffer always holds the running mean of all passes; earlier pixel data
/// is never invalidated structurally, only refined statistically.
pub struct Framebuffer {
    width: u32,
    height: u32,
    accum: Vec<Vec4>,
    passes: u32,
}

impl Framebuffer {
    /// Allocate a cleared framebuffer sized from the context settings.
    pub fn new(ctx: &Context) -> Self {
        let settings = ctx.settings();
        Self {
            width: settings.image_width,
            height: settings.image_height,
            accum: vec![Vec4::ZERO; settings.pixel_count()],
            passes: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of passes blended in so far.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn reset_accumulation(&mut self) {
        self.accum.fill(Vec4::ZERO);
        self.passes = 0;
    }

    /// Blend one finished pass into the buffer. `pixels` must cover the
    /// full resolution.
    pub(crate) fn accumulate(&mut self, pixels: &[Vec4]) {
        assert_eq!(pixels.len(), self.accum.len());
        self.passes += 1;
        let weight = 1.0 / self.passes as f32;
        for (acc, &p) in self.accum.iter_mut().zip(pixels) {
            *acc += (p - *acc) * weight;
        }
    }

    /// Snapshot of the color channel as packed 8-bit sRGBA pixels, byte
    /// order r, g, b, a. The returned buffer is an owned copy; the
    /// framebuffer stays mapped for further passes.
    pub fn map_color(&self) -> Vec<u32> {
        self.accum.iter().map(|&c| pack_srgba(c)).collect()
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn pack_srgba(c: Vec4) -> u32 {
    let quantize = |v: f32| (linear_to_srgb(v) * 255.0 + 0.5) as u32;
    let r = quantize(c.x);
    let g = quantize(c.y);
    let b = quantize(c.z);
    // Alpha is coverage, not color: quantized linearly.
    let a = (c.w.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    r | (g << 8) | (b << 16) | (a << 24)
}
