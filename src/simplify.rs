use super::{distance, Point};

/// Thin out a track: keep the first point, then every point lying at least
/// `min_distance` kilometers away from the last kept one.
pub fn filter_track(points: &[Point], min_distance: f64) -> Vec<Point> {
    retained_indices(points, min_distance)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Positions in `points` of the points kept by `filter_track`.
pub fn retained_indices(points: &[Point], min_distance: f64) -> Vec<usize> {
    let mut kept = Vec::new();
    let Some(mut anchor) = points.first() else {
        return kept;
    };
    kept.push(0);
    for (i, point) in points.iter().enumerate().skip(1) {
        if distance(anchor, point) >= min_distance {
            kept.push(i);
            anchor = point;
        }
    }
    kept
}
