//! Path Orderer
//!
//! Greedy nearest-neighbour ordering of a layer's points. The first input
//! point is always the start; each step moves to the closest unvisited
//! point, ties going to whichever comes first in the remaining list.
//! Quadratic in the number of points.

use pointplot_core::Point;

/// Point visiting order strategies
#[derive(Debug)]
pub struct PathOrderer;

impl PathOrderer {
    /// Order points by greedy nearest neighbour. Output is a permutation of the input.
    pub fn nearest_neighbor(points: &[Point]) -> Vec<Point> {
        let Some((first, rest)) = points.split_first() else {
            return Vec::new();
        };

        let mut ordered = Vec::with_capacity(points.len());
        let mut remaining = rest.to_vec();
        let mut current = *first;
        ordered.push(current);

        while !remaining.is_empty() {
            let mut min_dist = f64::INFINITY;
            let mut min_idx = 0;

            for (i, candidate) in remaining.iter().enumerate() {
                let dist = current.distance_to(candidate);
                if dist < min_dist {
                    min_dist = dist;
                    min_idx = i;
                }
            }

            // `remove` keeps the rest in input order for the tie-break
            current = remaining.remove(min_idx);
            ordered.push(current);
        }

        ordered
    }

    /// Total XY travel distance when visiting points in the given order
    pub fn path_length(points: &[Point]) -> f64 {
        points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}
