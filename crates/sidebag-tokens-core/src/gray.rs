use image::{GrayImage, ImageBuffer, Luma, RgbImage};

/// Single-channel intensity of a color page.
pub fn to_gray(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Gaussian-blur a `GrayImage` via `imageproc`.
///
/// A non-positive `sigma` returns an unmodified copy.
pub fn blur_gray(img: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 || !sigma.is_finite() {
        return img.clone();
    }
    let (w, h) = img.dimensions();
    let f: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(w, h, |x, y| Luma([img.get_pixel(x, y)[0] as f32]));
    let blurred = imageproc::filter::gaussian_blur_f32(&f, sigma);
    ImageBuffer::from_fn(w, h, |x, y| {
        let v = blurred.get_pixel(x, y)[0].clamp(0.0, 255.0);
        Luma([v.round() as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn blur_keeps_flat_image_flat() {
        let img = GrayImage::from_pixel(32, 24, Luma([120]));
        let out = blur_gray(&img, 2.0);
        assert_eq!(out.dimensions(), (32, 24));
        assert!(out.pixels().all(|p| p[0].abs_diff(120) <= 1));
    }

    #[test]
    fn blur_softens_a_step() {
        let img = GrayImage::from_fn(40, 10, |x, _| Luma([if x < 20 { 0 } else { 255 }]));
        let out = blur_gray(&img, 2.0);
        let at_edge = out.get_pixel(20, 5)[0];
        assert!(at_edge > 0 && at_edge < 255);
        assert!(out.get_pixel(1, 5)[0] < 10);
        assert!(out.get_pixel(38, 5)[0] > 245);
    }

    #[test]
    fn zero_sigma_is_identity() {
        let img = GrayImage::from_fn(8, 8, |x, y| Luma([(x * 8 + y) as u8]));
        assert_eq!(blur_gray(&img, 0.0), img);
    }

    #[test]
    fn gray_of_white_is_white() {
        let img = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        assert!(to_gray(&img).pixels().all(|p| p[0] == 255));
    }
}
