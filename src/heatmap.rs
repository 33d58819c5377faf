use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

pub const SURFACE_WIDTH: u32 = 640;
pub const SURFACE_HEIGHT: u32 = 360;
pub const BLOB_RADIUS: f64 = 28.0;
pub const PITCH_INSET: f64 = 10.0;

/// Position sample in surface units (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Straight (non-premultiplied) color with a 0..=1 opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Paint {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    fn lerp(self, other: Paint, t: f64) -> Paint {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Paint {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background_start: Paint,
    pub background_end: Paint,
    /// Blob center color; its alpha is the peak opacity.
    pub accent: Paint,
    pub pitch_lines: Paint,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_start: Paint::rgb(0x0f, 0x2a, 0x44),
            background_end: Paint::rgb(0x0a, 0x1c, 0x30),
            accent: Paint::rgba(49, 232, 174, 0.45),
            pitch_lines: Paint::rgba(255, 255, 255, 0.12),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fills the whole surface, interpolating along the `from -> to` axis.
    LinearGradient {
        from: Point,
        to: Point,
        start: Paint,
        end: Paint,
    },
    /// Disc whose opacity falls linearly from `color.alpha` at the center to 0 at `radius`.
    RadialBlob {
        center: Point,
        radius: f64,
        color: Paint,
    },
    /// One-unit outline.
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Paint,
    },
    VerticalLine {
        x: f64,
        top: f64,
        bottom: f64,
        color: Paint,
    },
}

/// Builds the paint list for one heatmap: background, one blob per sample in input order,
/// then the pitch outline and halfway line on top.
pub fn heatmap_commands(points: &[Point], surface: Surface, palette: &Palette) -> Vec<DrawCommand> {
    let width = surface.width as f64;
    let height = surface.height as f64;
    let mut commands = Vec::with_capacity(points.len() + 3);

    commands.push(DrawCommand::LinearGradient {
        from: Point::new(0.0, 0.0),
        to: Point::new(width, height),
        start: palette.background_start,
        end: palette.background_end,
    });

    for point in points.iter().filter(|p| p.is_finite()) {
        commands.push(DrawCommand::RadialBlob {
            center: *point,
            radius: BLOB_RADIUS,
            color: palette.accent,
        });
    }

    commands.push(DrawCommand::StrokeRect {
        x: PITCH_INSET,
        y: PITCH_INSET,
        width: width - 2.0 * PITCH_INSET,
        height: height - 2.0 * PITCH_INSET,
        color: palette.pitch_lines,
    });
    commands.push(DrawCommand::VerticalLine {
        x: width / 2.0,
        top: PITCH_INSET,
        bottom: height - PITCH_INSET,
        color: palette.pitch_lines,
    });

    commands
}

/// Paints `commands` in order onto a fresh, fully transparent buffer.
pub fn rasterize(commands: &[DrawCommand], surface: Surface) -> RgbaImage {
    let mut img = RgbaImage::new(surface.width, surface.height);
    for command in commands {
        match command {
            DrawCommand::LinearGradient {
                from,
                to,
                start,
                end,
            } => fill_linear_gradient(&mut img, *from, *to, *start, *end),
            DrawCommand::RadialBlob {
                center,
                radius,
                color,
            } => fill_radial_blob(&mut img, *center, *radius, *color),
            DrawCommand::StrokeRect {
                x,
                y,
                width,
                height,
                color,
            } => stroke_rect(&mut img, *x, *y, *width, *height, *color),
            DrawCommand::VerticalLine {
                x,
                top,
                bottom,
                color,
            } => {
                let col = x.floor() as i64;
                let (top, bottom) = span(*top, *bottom);
                for row in top..=bottom {
                    blend_pixel(&mut img, col, row, *color);
                }
            }
        }
    }
    img
}

pub fn render_heatmap(points: &[Point], surface: Surface, palette: &Palette) -> RgbaImage {
    rasterize(&heatmap_commands(points, surface, palette), surface)
}

pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create export dir {}", dir.display()))?;
    }
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("write heatmap png {}", path.display()))
}

/// Source-over composite of `src` onto `dst`.
pub fn blend_over(dst: Rgba<u8>, src: Paint) -> Rgba<u8> {
    let sa = src.alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let value = (s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src.r, dst[0]),
        channel(src.g, dst[1]),
        channel(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Paint) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let blended = blend_over(*img.get_pixel(x, y), color);
    img.put_pixel(x, y, blended);
}

fn fill_linear_gradient(img: &mut RgbaImage, from: Point, to: Point, start: Paint, end: Paint) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len_sq = dx * dx + dy * dy;
    for y in 0..img.height() {
        for x in 0..img.width() {
            let t = if len_sq > 0.0 {
                let px = x as f64 + 0.5 - from.x;
                let py = y as f64 + 0.5 - from.y;
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            blend_pixel(img, x as i64, y as i64, start.lerp(end, t));
        }
    }
}

fn fill_radial_blob(img: &mut RgbaImage, center: Point, radius: f64, color: Paint) {
    if radius <= 0.0 {
        return;
    }
    let x0 = (center.x - radius).floor().max(0.0) as i64;
    let y0 = (center.y - radius).floor().max(0.0) as i64;
    let x1 = ((center.x + radius).ceil() as i64).min(img.width() as i64 - 1);
    let y1 = ((center.y + radius).ceil() as i64).min(img.height() as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - center.x;
            let dy = y as f64 + 0.5 - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > radius {
                continue;
            }
            let fade = 1.0 - dist / radius;
            blend_pixel(img, x, y, color.with_alpha(color.alpha * fade));
        }
    }
}

fn stroke_rect(img: &mut RgbaImage, x: f64, y: f64, width: f64, height: f64, color: Paint) {
    let (left, right) = span(x, x + width);
    let (top, bottom) = span(y, y + height);
    if right < left || bottom < top {
        return;
    }
    for col in left..=right {
        blend_pixel(img, col, top, color);
        if bottom != top {
            blend_pixel(img, col, bottom, color);
        }
    }
    // Corners already painted by the horizontal edges.
    for row in (top + 1)..bottom {
        blend_pixel(img, left, row, color);
        if right != left {
            blend_pixel(img, right, row, color);
        }
    }
}

/// Inclusive pixel range covered by the unit interval `[start, end)`.
fn span(start: f64, end: f64) -> (i64, i64) {
    (start.round() as i64, end.round() as i64 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_destination() {
        let out = blend_over(Rgba([1, 2, 3, 255]), Paint::rgb(200, 100, 50));
        assert_eq!(out, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn transparent_source_is_a_no_op() {
        let dst = Rgba([10, 20, 30, 255]);
        assert_eq!(blend_over(dst, Paint::rgba(255, 255, 255, 0.0)), dst);
    }

    #[test]
    fn blend_onto_empty_buffer_keeps_source_color() {
        let out = blend_over(Rgba([0, 0, 0, 0]), Paint::rgba(49, 232, 174, 0.45));
        assert_eq!(&out.0[..3], &[49, 232, 174]);
        assert_eq!(out[3], 115);
    }

    #[test]
    fn span_covers_inset_symmetrically() {
        assert_eq!(span(10.0, 630.0), (10, 629));
        assert_eq!(span(10.0, 350.0), (10, 349));
    }
}
