use nalgebra::{Point3, Vector3};

/// Distances between every point of `a` (rows) and every point of `b` (columns).
pub fn distance_matrix(a: &[Point3<f64>], b: &[Point3<f64>]) -> Vec<Vec<f64>> {
    a.iter()
        .map(|p| b.iter().map(|q| nalgebra::distance(p, q)).collect())
        .collect()
}

/// Weighted centroid of `points`. Returns `None` when there are no points, the weight
/// slice has a different length, or the weights sum to zero.
pub fn weighted_centroid(points: &[Point3<f64>], weights: &[f64]) -> Option<Point3<f64>> {
    if points.is_empty() || points.len() != weights.len() {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return None;
    }
    let weighted_sum: Vector3<f64> = points
        .iter()
        .zip(weights)
        .map(|(p, &w)| p.coords * w)
        .sum();
    Some(Point3::from(weighted_sum / total))
}

/// Unweighted centroid of `points`, or `None` if empty.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    weighted_centroid(points, &vec![1.0; points.len()])
}

/// Index of the point closest to `target`. Ties resolve to the lowest index.
pub fn index_of_closest(points: &[Point3<f64>], target: &Point3<f64>) -> Option<usize> {
    points
        .iter()
        .map(|p| nalgebra::distance_squared(p, target))
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Position of a capping atom bonded to `anchor`, placed `bond_length` away from it in
/// the direction of `toward`.
///
/// Returns `None` if the two points coincide and the direction is undefined.
pub fn cap_position(
    anchor: &Point3<f64>,
    toward: &Point3<f64>,
    bond_length: f64,
) -> Option<Point3<f64>> {
    let direction = (toward - anchor).try_normalize(f64::EPSILON)?;
    Some(anchor + direction * bond_length)
}
