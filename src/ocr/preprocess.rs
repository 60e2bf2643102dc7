use image::{ImageBuffer, Rgba};

use crate::config::PixelRect;

/// Crops a fixed pixel rectangle (like ImageMagick `-crop WxH+X+Y +repage`).
///
/// The rectangle is clamped to the image bounds; a region entirely outside
/// the image yields an empty image.
pub fn crop_pixels(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    region: &PixelRect,
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let (w, h) = img.dimensions();

    let x0 = region.x.min(w);
    let y0 = region.y.min(h);
    let rw = region.width.min(w - x0);
    let rh = region.height.min(h - y0);

    image::imageops::crop_imm(img, x0, y0, rw, rh).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_pixels() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(100, 200, |x, y| {
            Rgba([x as u8, y as u8, 0, 255])
        });

        let region = PixelRect { x: 10, y: 50, width: 50, height: 20 };
        let cropped = crop_pixels(&img, &region);

        assert_eq!(cropped.dimensions(), (50, 20));
        assert_eq!(cropped.get_pixel(0, 0)[0], 10);
        assert_eq!(cropped.get_pixel(0, 0)[1], 50);
    }

    #[test]
    fn test_crop_pixels_clamps() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(100, 100);
        let region = PixelRect { x: 90, y: 90, width: 50, height: 50 };
        assert_eq!(crop_pixels(&img, &region).dimensions(), (10, 10));
    }

    #[test]
    fn test_crop_pixels_outside_is_empty() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(100, 100);
        let region = PixelRect::default();
        let cropped = crop_pixels(&img, &region);
        assert_eq!(cropped.width() * cropped.height(), 0);
    }
}
