// Gamma-correct color mixing for anti-aliased stroke edges.
// Visual: partially covered edge pixels fade smoothly into the backdrop with no dark halo.

use std::sync::OnceLock;

use crate::types::Color;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static GammaLut {
        static LUT: OnceLock<GammaLut> = OnceLock::new();
        LUT.get_or_init(GammaLut::new)
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Paint `fg` over `bg` at `coverage` (0 = untouched, 1 = fully covered).
    /// The stroke's own alpha scales its coverage; color channels mix in linear light.
    pub fn over(&self, bg: Color, fg: Color, coverage: f32) -> Color {
        let a = coverage.clamp(0.0, 1.0) * (fg.a as f32 / 255.0);
        if a <= 0.0 {
            return bg;
        }
        if a >= 1.0 {
            return fg;
        }

        let inv = 1.0 - a;
        let mix = |b: u8, f: u8| {
            self.linear_to_srgb_u8(a * self.srgb_u8_to_linear(f) + inv * self.srgb_u8_to_linear(b))
        };
        let alpha = (a * 255.0 + inv * bg.a as f32).round().clamp(0.0, 255.0) as u8;
        Color::rgba(mix(bg.r, fg.r), mix(bg.g, fg.g), mix(bg.b, fg.b), alpha)
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
