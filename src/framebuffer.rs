use crate::color::Rgb;
use crate::renderer::Slice;

/// CPU-side frame in `0x00RRGGBB`, row-major.
pub struct Framebuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_u32());
    }

    /// Fills each slice's 1-pixel-wide column span. Spans are clipped to the frame.
    pub fn paint_slices(&mut self, slices: &[Slice]) {
        for slice in slices {
            let x = slice.x as usize;
            if x >= self.width {
                continue;
            }
            let y0 = (slice.y_start as usize).min(self.height);
            let y1 = y0.saturating_add(slice.height as usize).min(self.height);
            let color = slice.color.to_u32();

            // Vertical draw
            let mut idx = y0 * self.width + x;
            for _y in y0..y1 {
                self.pixels[idx] = color;
                idx += self.width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_only_the_slice_span() {
        let mut fb = Framebuffer::new(4, 10);
        fb.clear(Rgb::BLACK);
        fb.paint_slices(&[Slice {
            x: 2,
            y_start: 3,
            height: 4,
            color: Rgb::GREEN,
        }]);

        for y in 0..10 {
            let expected = if (3..7).contains(&y) {
                Rgb::GREEN.to_u32()
            } else {
                0
            };
            assert_eq!(fb.pixel(2, y), Some(expected), "row {y}");
            assert_eq!(fb.pixel(1, y), Some(0));
        }
    }

    #[test]
    fn clips_oversized_and_offscreen_slices() {
        let mut fb = Framebuffer::new(2, 5);
        fb.clear(Rgb::WHITE);
        fb.paint_slices(&[
            Slice {
                x: 0,
                y_start: 2,
                height: u32::MAX,
                color: Rgb::BLUE,
            },
            Slice {
                x: 9,
                y_start: 0,
                height: 5,
                color: Rgb::RED,
            },
        ]);
        assert_eq!(fb.pixel(0, 1), Some(Rgb::WHITE.to_u32()));
        assert_eq!(fb.pixel(0, 4), Some(Rgb::BLUE.to_u32()));
        assert!(fb.pixels().iter().all(|&p| p != Rgb::RED.to_u32()));
    }
}
