use image::RgbaImage;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

/// Draws a bitmap into terminal cells using upper-half blocks: each cell shows two stacked
/// pixels (foreground = top, background = bottom), nearest-neighbour scaled to the area.
pub struct BitmapView<'a> {
    image: &'a RgbaImage,
}

impl<'a> BitmapView<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }

    fn sample(&self, col: u16, sub_row: u32, area: Rect) -> Color {
        let (w, h) = self.image.dimensions();
        let rows = area.height as u32 * 2;
        let x = ((col as u32 * w) / area.width as u32).min(w - 1);
        let y = ((sub_row * h) / rows).min(h - 1);
        let px = self.image.get_pixel(x, y);
        Color::Rgb(px[0], px[1], px[2])
    }
}

impl Widget for BitmapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = self.image.dimensions();
        if area.width == 0 || area.height == 0 || w == 0 || h == 0 {
            return;
        }
        for row in 0..area.height {
            for col in 0..area.width {
                let top = self.sample(col, row as u32 * 2, area);
                let bottom = self.sample(col, row as u32 * 2 + 1, area);
                buf.get_mut(area.x + col, area.y + row)
                    .set_symbol("▀")
                    .set_fg(top)
                    .set_bg(bottom);
            }
        }
    }
}

/// Cell area that keeps the bitmap's aspect ratio inside `area` (cells are ~1:2).
pub fn fit_area(area: Rect, width: u32, height: u32) -> Rect {
    if area.width == 0 || area.height == 0 || width == 0 || height == 0 {
        return Rect { width: 0, height: 0, ..area };
    }
    let max_h_by_width = (area.width as u32 * height) / (width * 2);
    let (cols, rows) = if max_h_by_width <= area.height as u32 {
        (area.width as u32, max_h_by_width.max(1))
    } else {
        let cols = (area.height as u32 * 2 * width) / height;
        (cols.min(area.width as u32).max(1), area.height as u32)
    };
    Rect {
        x: area.x + (area.width - cols as u16) / 2,
        y: area.y + (area.height - rows as u16) / 2,
        width: cols as u16,
        height: rows as u16,
    }
}
