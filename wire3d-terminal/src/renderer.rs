//! ASCII downsampler: turns the pixel frame into terminal characters
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{FrameBuffer, Rgb, Surface};

/// Character luminosity ramp for cell coverage (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Maps blocks of framebuffer pixels onto a grid of terminal cells
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    coverage: Vec<u32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        let size = cols * rows;
        Self {
            cols,
            rows,
            coverage: vec![0; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        *self = Self::new(cols, rows);
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.char_buffer[row * self.cols + col])
        } else {
            None
        }
    }

    /// Count non-background pixels per cell and pick a ramp character
    pub fn rasterize(&mut self, frame: &FrameBuffer, background: Rgb) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }

        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let background = background.to_argb();
        self.coverage.fill(0);

        let col_of: Vec<usize> = (0..width).map(|x| x * self.cols / width).collect();
        for (y, line) in frame.pixels().chunks_exact(width).enumerate() {
            let row = y * self.rows / height;
            let base = row * self.cols;
            for (x, &pixel) in line.iter().enumerate() {
                if pixel != background {
                    self.coverage[base + col_of[x]] += 1;
                }
            }
        }

        let cell_area = ((width as f32 / self.cols as f32) * (height as f32 / self.rows as f32)).max(1.0);
        let top = LUMINOSITY_RAMP.len() - 1;
        for (cell, &lit) in self.char_buffer.iter_mut().zip(&self.coverage) {
            *cell = if lit == 0 {
                ' '
            } else {
                // thin lines cover a sliver of a cell, so lift them with a square root
                let level = ((lit as f32 / cell_area).min(1.0).sqrt() * top as f32).ceil() as usize;
                LUMINOSITY_RAMP[level.clamp(1, top)]
            };
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (index, row) in self.char_buffer.chunks(self.cols.max(1)).enumerate() {
            // no trailing newline, it would scroll the bottom row away
            if index > 0 {
                writer.queue(Print("\r\n"))?;
            }
            let mut current = None;
            for &c in row {
                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::Sprite;

    #[test]
    fn test_empty_frame_is_blank() {
        let frame = FrameBuffer::new(40, 20);
        let mut ascii = AsciiRenderer::new(4, 2);
        ascii.rasterize(&frame, Rgb::BLACK);
        for row in 0..2 {
            for col in 0..4 {
                assert_eq!(ascii.char_at(col, row), Some(' '));
            }
        }
    }

    #[test]
    fn test_full_cell_is_brightest() {
        let mut frame = FrameBuffer::new(40, 20);
        let block = Sprite::filled_circle(10, 10, 5, 5, 20, Rgb::WHITE);
        frame.blit(&block, 0, 0);

        let mut ascii = AsciiRenderer::new(4, 2);
        ascii.rasterize(&frame, Rgb::BLACK);
        assert_eq!(ascii.char_at(0, 0), Some('@'));
        assert_eq!(ascii.char_at(1, 0), Some(' '));
        assert_eq!(ascii.char_at(0, 1), Some(' '));
    }

    #[test]
    fn test_thin_line_is_visible() {
        let mut frame = FrameBuffer::new(40, 20);
        frame.line(0, 15, 39, 15, Rgb::WHITE);

        let mut ascii = AsciiRenderer::new(4, 2);
        ascii.rasterize(&frame, Rgb::BLACK);
        for col in 0..4 {
            let c = ascii.char_at(col, 1).unwrap();
            assert_ne!(c, ' ');
            assert_ne!(c, '@');
        }
    }

    #[test]
    fn test_draw_writes_every_row() {
        let ascii = AsciiRenderer::new(3, 2);
        let mut out = Vec::new();
        ascii.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\r\n").count(), 1);
        assert_eq!(text.matches(' ').count(), 6);
    }
}
