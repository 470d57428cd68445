use crate::accumulator::EdgeMap;

/// Radius chosen for one center and the number of edge pixels backing it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusEstimate {
    pub radius: u32,
    pub support: u32,
}

/// Pick the radius around `(cx, cy)` best supported by edge pixels.
///
/// Distances to edge pixels are binned to whole pixels inside the band
/// `[min_radius, max_radius]`; the 3-bin window with the largest count wins
/// (smallest radius on ties) and the radius is the window's weighted mean.
pub fn estimate_radius(
    edges: &EdgeMap,
    cx: u32,
    cy: u32,
    min_radius: u32,
    max_radius: u32,
) -> Option<RadiusEstimate> {
    if min_radius == 0 || min_radius > max_radius {
        return None;
    }

    let mut hist = vec![0u32; max_radius as usize + 2];
    let r_min_sq = (min_radius as f32 - 0.5).powi(2);
    let r_max_sq = (max_radius as f32 + 0.5).powi(2);

    for p in edges.rows(cy.saturating_sub(max_radius), cy.saturating_add(max_radius)) {
        let dx = p.x as f32 - cx as f32;
        let dy = p.y as f32 - cy as f32;
        let d_sq = dx * dx + dy * dy;
        if d_sq < r_min_sq || d_sq >= r_max_sq {
            continue;
        }
        let bin = (d_sq.sqrt().round() as usize).clamp(min_radius as usize, max_radius as usize);
        hist[bin] += 1;
    }

    let mut best: Option<(usize, u32)> = None;
    for r in min_radius as usize..=max_radius as usize {
        let window = hist[r - 1] + hist[r] + hist[r + 1];
        if best.map(|(_, s)| window > s).unwrap_or(true) {
            best = Some((r, window));
        }
    }

    let (r, support) = best?;
    if support == 0 {
        return None;
    }
    let weighted = ((r - 1) as u32 * hist[r - 1] + r as u32 * hist[r] + (r + 1) as u32 * hist[r + 1])
        as f32
        / support as f32;
    Some(RadiusEstimate {
        radius: (weighted.round() as u32).clamp(min_radius, max_radius),
        support,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::EdgePoint;

    fn ring_edges(cx: f32, cy: f32, r: f32, n: usize) -> EdgeMap {
        let mut points: Vec<EdgePoint> = (0..n)
            .map(|k| {
                let t = std::f32::consts::TAU * k as f32 / n as f32;
                let (s, c) = t.sin_cos();
                EdgePoint {
                    x: (cx + r * c).round() as u32,
                    y: (cy + r * s).round() as u32,
                    dx: c,
                    dy: s,
                }
            })
            .collect();
        points.sort_by_key(|p| (p.y, p.x));
        EdgeMap {
            width: 200,
            height: 200,
            points,
        }
    }

    #[test]
    fn recovers_ring_radius() {
        let edges = ring_edges(100.0, 100.0, 32.0, 180);
        let est = estimate_radius(&edges, 100, 100, 25, 45).unwrap();
        assert!(est.radius.abs_diff(32) <= 1, "{est:?}");
        assert!(est.support >= 150);
    }

    #[test]
    fn ring_outside_band_is_ignored() {
        let edges = ring_edges(100.0, 100.0, 60.0, 180);
        assert_eq!(estimate_radius(&edges, 100, 100, 25, 45), None);
    }

    #[test]
    fn stronger_ring_wins() {
        let mut edges = ring_edges(100.0, 100.0, 40.0, 200);
        edges.points.extend(ring_edges(100.0, 100.0, 28.0, 60).points);
        edges.points.sort_by_key(|p| (p.y, p.x));
        let est = estimate_radius(&edges, 100, 100, 25, 45).unwrap();
        assert!(est.radius.abs_diff(40) <= 1, "{est:?}");
    }

    #[test]
    fn invalid_band_is_none() {
        let edges = ring_edges(100.0, 100.0, 30.0, 90);
        assert_eq!(estimate_radius(&edges, 100, 100, 0, 45), None);
        assert_eq!(estimate_radius(&edges, 100, 100, 46, 45), None);
    }
}
