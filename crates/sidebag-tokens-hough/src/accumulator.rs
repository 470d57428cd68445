//! Edge extraction and gradient-directed center voting.

use image::GrayImage;

/// An edge pixel with its unit gradient direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePoint {
    pub x: u32,
    pub y: u32,
    pub dx: f32,
    pub dy: f32,
}

/// Edge pixels of an image, sorted by row then column.
#[derive(Clone, Debug, Default)]
pub struct EdgeMap {
    pub width: u32,
    pub height: u32,
    pub points: Vec<EdgePoint>,
}

impl EdgeMap {
    /// Canny edges of `gray`, keeping pixels with a non-zero Sobel gradient.
    pub fn from_gray(gray: &GrayImage, canny_low: f32, canny_high: f32) -> Self {
        let (width, height) = gray.dimensions();
        if width < 3 || height < 3 {
            return Self {
                width,
                height,
                points: Vec::new(),
            };
        }

        let edges = imageproc::edges::canny(gray, canny_low, canny_high);
        let gx = imageproc::gradients::horizontal_sobel(gray);
        let gy = imageproc::gradients::vertical_sobel(gray);

        let mut points = Vec::new();
        for (x, y, px) in edges.enumerate_pixels() {
            if px[0] == 0 {
                continue;
            }
            let gxv = gx.get_pixel(x, y)[0] as f32;
            let gyv = gy.get_pixel(x, y)[0] as f32;
            let mag = (gxv * gxv + gyv * gyv).sqrt();
            if mag < 1e-3 {
                continue;
            }
            points.push(EdgePoint {
                x,
                y,
                dx: gxv / mag,
                dy: gyv / mag,
            });
        }

        Self {
            width,
            height,
            points,
        }
    }

    /// Edge points whose row lies in `[y_min, y_max]`.
    pub fn rows(&self, y_min: u32, y_max: u32) -> &[EdgePoint] {
        let start = self.points.partition_point(|p| p.y < y_min);
        let end = self.points.partition_point(|p| p.y <= y_max);
        &self.points[start..end.max(start)]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A local maximum of the center accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CenterCandidate {
    pub x: u32,
    pub y: u32,
    pub votes: u32,
}

/// Per-pixel vote counts for circle centers.
#[derive(Clone, Debug)]
pub struct Accumulator {
    pub width: u32,
    pub height: u32,
    pub votes: Vec<u32>,
}

impl Accumulator {
    /// Cast votes from every edge point along `+gradient` and `-gradient`
    /// at each integer radius in `[min_radius, max_radius]`.
    ///
    /// A ray deposits at most one vote per cell.
    pub fn vote(edges: &EdgeMap, min_radius: u32, max_radius: u32) -> Self {
        let stride = edges.width as usize;
        let mut votes = vec![0u32; stride * edges.height as usize];
        let w = edges.width as i64;
        let h = edges.height as i64;

        for p in &edges.points {
            for sign in [1.0f32, -1.0] {
                let mut last: Option<usize> = None;
                for r in min_radius..=max_radius {
                    let rf = sign * r as f32;
                    let cx = (p.x as f32 + p.dx * rf).round() as i64;
                    let cy = (p.y as f32 + p.dy * rf).round() as i64;
                    if cx < 0 || cy < 0 || cx >= w || cy >= h {
                        break;
                    }
                    let idx = cy as usize * stride + cx as usize;
                    if last == Some(idx) {
                        continue;
                    }
                    votes[idx] += 1;
                    last = Some(idx);
                }
            }
        }

        Self {
            width: edges.width,
            height: edges.height,
            votes,
        }
    }

    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.votes[y as usize * self.width as usize + x as usize]
    }

    /// Cells with more than `threshold` votes that dominate their
    /// 4-neighborhood, strongest first (row-major order on ties).
    pub fn peaks(&self, threshold: u32) -> Vec<CenterCandidate> {
        let stride = self.width as usize;
        let mut out = Vec::new();
        if self.width < 3 || self.height < 3 {
            return out;
        }

        for y in 1..self.height as usize - 1 {
            for x in 1..stride - 1 {
                let idx = y * stride + x;
                let v = self.votes[idx];
                if v <= threshold {
                    continue;
                }
                let left = self.votes[idx - 1];
                let right = self.votes[idx + 1];
                let up = self.votes[idx - stride];
                let down = self.votes[idx + stride];
                if v > left && v >= right && v > up && v >= down {
                    out.push(CenterCandidate {
                        x: x as u32,
                        y: y as u32,
                        votes: v,
                    });
                }
            }
        }

        // Stable: equal votes keep row-major order.
        out.sort_by(|a, b| b.votes.cmp(&a.votes));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn disk_image(w: u32, h: u32, cx: f32, cy: f32, r: f32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r * r {
                Luma([30])
            } else {
                Luma([230])
            }
        })
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = GrayImage::from_pixel(50, 40, Luma([128]));
        let edges = EdgeMap::from_gray(&img, 25.0, 50.0);
        assert!(edges.is_empty());
    }

    #[test]
    fn disk_edges_lie_on_the_rim() {
        let img = disk_image(100, 100, 50.0, 50.0, 20.0);
        let edges = EdgeMap::from_gray(&img, 25.0, 50.0);
        assert!(edges.len() > 60, "only {} edge points", edges.len());
        for p in &edges.points {
            let d = ((p.x as f32 - 50.0).powi(2) + (p.y as f32 - 50.0).powi(2)).sqrt();
            assert!((d - 20.0).abs() < 3.0, "edge at distance {d}");
        }
    }

    #[test]
    fn rows_selects_a_band() {
        let img = disk_image(100, 100, 50.0, 50.0, 20.0);
        let edges = EdgeMap::from_gray(&img, 25.0, 50.0);
        let band = edges.rows(45, 55);
        assert!(!band.is_empty());
        assert!(band.iter().all(|p| (45..=55).contains(&p.y)));
        assert!(edges.rows(90, 99).is_empty());
    }

    #[test]
    fn votes_peak_at_disk_center() {
        let img = sidebag_tokens_core::blur_gray(&disk_image(100, 100, 50.0, 50.0, 20.0), 2.0);
        let edges = EdgeMap::from_gray(&img, 25.0, 50.0);
        let acc = Accumulator::vote(&edges, 15, 25);
        let peaks = acc.peaks(10);
        assert!(!peaks.is_empty());
        let best = peaks[0];
        assert!(best.x.abs_diff(50) <= 2 && best.y.abs_diff(50) <= 2, "{best:?}");
    }

    #[test]
    fn peaks_respect_threshold_and_order() {
        let mut acc = Accumulator {
            width: 7,
            height: 5,
            votes: vec![0; 35],
        };
        acc.votes[7 + 1] = 5;
        acc.votes[2 * 7 + 4] = 9;
        acc.votes[3 * 7 + 2] = 9;
        let peaks = acc.peaks(4);
        assert_eq!(
            peaks,
            vec![
                CenterCandidate { x: 4, y: 2, votes: 9 },
                CenterCandidate { x: 2, y: 3, votes: 9 },
                CenterCandidate { x: 1, y: 1, votes: 5 },
            ]
        );
        assert!(acc.peaks(9).is_empty());
        assert_eq!(acc.get(4, 2), 9);
    }
}
