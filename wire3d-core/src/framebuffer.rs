//! Software pixel surface: the drawing primitives the renderer talks to
//!
//! Pixels are stored as `0xAARRGGBB` words, which is also the layout native
//! window buffers expect (the alpha byte is ignored there).

/// An opaque 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }
}

/// Drawing target with a top-left origin.
///
/// Implementations clip every write to their bounds, so callers may pass
/// coordinates anywhere in `i32` range.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Overwrite every pixel
    fn fill(&mut self, color: Rgb);
    /// Copy the sprite's opaque pixels with its top-left corner at `(x, y)`
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32);
    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb);
}

/// A small bitmap with per-pixel transparency
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Sprite {
    /// Fully transparent sprite
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Transparent sprite holding one filled circle
    pub fn filled_circle(width: u32, height: u32, cx: i32, cy: i32, radius: i32, color: Rgb) -> Self {
        let mut sprite = Self::new(width, height);
        let argb = color.to_argb();
        let r2 = radius as i64 * radius as i64;

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let dx = (x - cx) as i64;
                let dy = (y - cy) as i64;
                if radius >= 0 && dx * dx + dy * dy <= r2 {
                    sprite.pixels[y as usize * width as usize + x as usize] = argb;
                }
            }
        }

        sprite
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw `0xAARRGGBB` value; zero alpha means transparent
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).is_some_and(|p| p >> 24 != 0)
    }
}

/// In-memory frame the renderer draws into and frontends present
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK.to_argb(); width as usize * height as usize],
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    fn put(&mut self, x: i64, y: i64, argb: u32) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.pixels[y as usize * self.width as usize + x as usize] = argb;
        }
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_argb());
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        for sy in 0..sprite.height {
            for sx in 0..sprite.width {
                let argb = sprite.pixels[sy as usize * sprite.width as usize + sx as usize];
                if argb >> 24 != 0 {
                    self.put(x as i64 + sx as i64, y as i64 + sy as i64, argb);
                }
            }
        }
    }

    /// Bresenham line, endpoints inclusive
    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
        let argb = color.to_argb();
        let (mut x, mut y) = (x1 as i64, y1 as i64);
        let (x2, y2) = (x2 as i64, y2 as i64);
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let step_x = if x < x2 { 1 } else { -1 };
        let step_y = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, argb);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }
}
