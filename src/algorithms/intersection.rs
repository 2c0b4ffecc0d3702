// src/algorithms/intersection.rs

use crate::geometry::{Ring, RingProperties};
use crate::types::Point2D;
use crate::utils::{constants, simple_geometry};

/// Paarweiser Überlappungstest für Polygon-Ringe.
///
/// Zwei Ringe gelten als überlappend, wenn sich ihre eingeschlossenen
/// Flächen schneiden. Reine Randberührung (gemeinsamer Vertex, anliegende
/// Kante) zählt nicht als Überlappung, damit benachbarte Formen nicht
/// fälschlich verschmolzen werden.
#[derive(Debug, Clone)]
pub struct IntersectionAnalyzer {
    tolerance: f32,
}

impl Default for IntersectionAnalyzer {
    fn default() -> Self {
        Self {
            tolerance: constants::GEOM_TOLERANCE,
        }
    }
}

impl IntersectionAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Prüft ob sich die Innenflächen zweier Ringe überlappen.
    ///
    /// Symmetrisch: `intersects(a, b) == intersects(b, a)`.
    pub fn intersects(&self, a: &Ring, b: &Ring) -> bool {
        // Bounding-Box-Frühausstieg
        if !a.bounds().intersects(&b.bounds()) {
            return false;
        }

        // Echte Kantenkreuzung: Schnittpunkt im Inneren beider Segmente
        for (a1, a2) in a.edges() {
            for (b1, b2) in b.edges() {
                if simple_geometry::segments_cross_properly(a1, a2, b1, b2, self.tolerance) {
                    return true;
                }
            }
        }

        // Enthaltensein: ein Vertex echt im Inneren des anderen Rings
        if self.any_vertex_strictly_inside(a, b) || self.any_vertex_strictly_inside(b, a) {
            return true;
        }

        // Deckungsgleiche bzw. rand-auf-rand liegende Ringe: innerer
        // Referenzpunkt des einen liegt echt im anderen
        self.point_strictly_inside(a.representative_point(), b)
            || self.point_strictly_inside(b.representative_point(), a)
    }

    fn any_vertex_strictly_inside(&self, inner: &Ring, outer: &Ring) -> bool {
        inner
            .distinct_vertices()
            .iter()
            .any(|&vertex| self.point_strictly_inside(vertex, outer))
    }

    fn point_strictly_inside(&self, point: Point2D, ring: &Ring) -> bool {
        if ring.on_boundary(point, self.tolerance) {
            return false;
        }
        ring.winding_number(point) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32) -> Ring {
        Ring::closed(vec![
            Point2D::new(min, min),
            Point2D::new(max, min),
            Point2D::new(max, max),
            Point2D::new(min, max),
        ])
        .unwrap()
    }

    #[test]
    fn test_overlapping_squares_intersect() {
        let a = square(0.0, 10.0);
        let b = Ring::closed(vec![
            Point2D::new(5.0, 5.0),
            Point2D::new(15.0, 5.0),
            Point2D::new(15.0, 15.0),
            Point2D::new(5.0, 15.0),
        ])
        .unwrap();

        let analyzer = IntersectionAnalyzer::new();
        assert!(analyzer.intersects(&a, &b));
        assert!(analyzer.intersects(&b, &a));
    }

    #[test]
    fn test_disjoint_squares_do_not_intersect() {
        let a = square(0.0, 10.0);
        let b = square(20.0, 30.0);

        let analyzer = IntersectionAnalyzer::new();
        assert!(!analyzer.intersects(&a, &b));
        assert!(!analyzer.intersects(&b, &a));
    }

    #[test]
    fn test_boundary_contact_is_not_an_intersection() {
        // Zwei Quadrate mit exakt gemeinsamer Kante
        let a = square(0.0, 10.0);
        let b = Ring::closed(vec![
            Point2D::new(10.0, 0.0),
            Point2D::new(20.0, 0.0),
            Point2D::new(20.0, 10.0),
            Point2D::new(10.0, 10.0),
        ])
        .unwrap();

        let analyzer = IntersectionAnalyzer::new();
        assert!(!analyzer.intersects(&a, &b));
        assert!(!analyzer.intersects(&b, &a));
    }

    #[test]
    fn test_shared_corner_is_not_an_intersection() {
        let a = square(0.0, 10.0);
        let b = Ring::closed(vec![
            Point2D::new(10.0, 10.0),
            Point2D::new(20.0, 10.0),
            Point2D::new(20.0, 20.0),
            Point2D::new(10.0, 20.0),
        ])
        .unwrap();

        let analyzer = IntersectionAnalyzer::new();
        assert!(!analyzer.intersects(&a, &b));
    }

    #[test]
    fn test_contained_ring_intersects() {
        let outer = square(0.0, 20.0);
        let inner = square(5.0, 10.0);

        let analyzer = IntersectionAnalyzer::new();
        assert!(analyzer.intersects(&outer, &inner));
        assert!(analyzer.intersects(&inner, &outer));
    }

    #[test]
    fn test_identical_rings_intersect() {
        let a = square(0.0, 10.0);
        let b = square(0.0, 10.0);

        let analyzer = IntersectionAnalyzer::new();
        assert!(analyzer.intersects(&a, &b));
    }

    #[test]
    fn test_symmetry_over_randomized_pairs() {
        use rand::Rng;

        let mut rng = rand::rng();
        let analyzer = IntersectionAnalyzer::new();

        for _ in 0..200 {
            let ax = rng.random_range(0.0..50.0);
            let ay = rng.random_range(0.0..50.0);
            let asz = rng.random_range(5.0..25.0);
            let bx = rng.random_range(0.0..50.0);
            let by = rng.random_range(0.0..50.0);
            let bsz = rng.random_range(5.0..25.0);

            let a = Ring::closed(vec![
                Point2D::new(ax, ay),
                Point2D::new(ax + asz, ay),
                Point2D::new(ax + asz, ay + asz),
                Point2D::new(ax, ay + asz),
            ])
            .unwrap();
            let b = Ring::closed(vec![
                Point2D::new(bx, by),
                Point2D::new(bx + bsz, by),
                Point2D::new(bx + bsz, by + bsz),
                Point2D::new(bx, by + bsz),
            ])
            .unwrap();

            assert_eq!(analyzer.intersects(&a, &b), analyzer.intersects(&b, &a));
        }
    }
}
