use image::GrayImage;
use log::{debug, warn};
use sidebag_tokens_core::Circle;

use crate::accumulator::{Accumulator, EdgeMap};
use crate::params::HoughCircleParams;
use crate::radius::estimate_radius;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Detect circles in a (pre-blurred) grayscale image.
///
/// Circles come back strongest center first. Invalid parameters are logged
/// and yield no circles.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(gray, params), fields(width = gray.width(), height = gray.height()))
)]
pub fn detect_circles(gray: &GrayImage, params: &HoughCircleParams) -> Vec<Circle> {
    if let Err(err) = params.validate() {
        warn!("hough parameters rejected: {err}");
        return Vec::new();
    }

    let edges = EdgeMap::from_gray(gray, params.canny_low(), params.canny_high);
    if edges.is_empty() {
        debug!("no edge pixels in {}x{} image", gray.width(), gray.height());
        return Vec::new();
    }

    let acc = Accumulator::vote(&edges, params.min_radius, params.max_radius);
    let candidates = acc.peaks(params.accumulator_threshold);
    debug!(
        "hough: {} edge pixels, {} center candidates",
        edges.len(),
        candidates.len()
    );

    let min_dist_sq = (params.min_dist * params.min_dist) as f64;
    let mut circles: Vec<Circle> = Vec::new();

    for cand in candidates {
        if params.max_circles.is_some_and(|max| circles.len() >= max) {
            break;
        }

        let probe = Circle::new(cand.x, cand.y, 0);
        if circles
            .iter()
            .any(|c| (c.center_dist_sq(&probe) as f64) < min_dist_sq)
        {
            continue;
        }

        let Some(est) = estimate_radius(
            &edges,
            cand.x,
            cand.y,
            params.min_radius,
            params.max_radius,
        ) else {
            continue;
        };
        if est.support < params.accumulator_threshold {
            continue;
        }

        circles.push(Circle::new(cand.x, cand.y, est.radius));
    }

    circles
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use sidebag_tokens_core::blur_gray;

    fn page_with_disks(w: u32, h: u32, disks: &[(f32, f32, f32)]) -> GrayImage {
        let img = GrayImage::from_fn(w, h, |x, y| {
            let inside = disks.iter().any(|&(cx, cy, r)| {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                dx * dx + dy * dy <= r * r
            });
            Luma([if inside { 40 } else { 245 }])
        });
        blur_gray(&img, 2.0)
    }

    fn assert_found(circles: &[Circle], x: u32, y: u32, r: u32) {
        assert!(
            circles
                .iter()
                .any(|c| c.x.abs_diff(x) <= 2 && c.y.abs_diff(y) <= 2 && c.radius.abs_diff(r) <= 2),
            "no circle near ({x}, {y}, r={r}) in {circles:?}"
        );
    }

    #[test]
    fn finds_single_disk() {
        let img = page_with_disks(200, 200, &[(100.0, 90.0, 32.0)]);
        let circles = detect_circles(&img, &HoughCircleParams::default());
        assert_eq!(circles.len(), 1, "{circles:?}");
        assert_found(&circles, 100, 90, 32);
    }

    #[test]
    fn finds_every_disk_in_band() {
        let disks = [
            (80.0, 80.0, 30.0),
            (220.0, 80.0, 40.0),
            (80.0, 220.0, 26.0),
            (220.0, 220.0, 35.0),
        ];
        let img = page_with_disks(300, 300, &disks);
        let circles = detect_circles(&img, &HoughCircleParams::default());
        assert_eq!(circles.len(), 4, "{circles:?}");
        for &(x, y, r) in &disks {
            assert_found(&circles, x as u32, y as u32, r as u32);
        }
    }

    #[test]
    fn small_disk_is_outside_band() {
        let img = page_with_disks(200, 200, &[(100.0, 100.0, 10.0)]);
        assert!(detect_circles(&img, &HoughCircleParams::default()).is_empty());
    }

    #[test]
    fn blank_page_has_no_circles() {
        let img = GrayImage::from_pixel(320, 240, Luma([250]));
        assert!(detect_circles(&img, &HoughCircleParams::default()).is_empty());
    }

    #[test]
    fn max_circles_caps_output() {
        let img = page_with_disks(300, 150, &[(70.0, 75.0, 30.0), (220.0, 75.0, 30.0)]);
        let params = HoughCircleParams {
            max_circles: Some(1),
            ..HoughCircleParams::default()
        };
        assert_eq!(detect_circles(&img, &params).len(), 1);
    }

    #[test]
    fn invalid_params_give_nothing() {
        let img = page_with_disks(200, 200, &[(100.0, 100.0, 30.0)]);
        let params = HoughCircleParams {
            min_radius: 60,
            max_radius: 30,
            ..HoughCircleParams::default()
        };
        assert!(detect_circles(&img, &params).is_empty());
    }
}
