// src/algorithms/simplify.rs

use crate::geometry::Ring;
use crate::utils::{comparison, constants, simple_geometry};
use crate::{error::*, types::*};

/// Reduziert eine rohe Punktfolge zu einem geschlossenen, geglätteten Ring.
///
/// Die Reduktion erfolgt per Douglas-Peucker (senkrechter Abstand zur
/// Sehne), anschließend optional eine Chaikin-Subdivision zum Glätten der
/// Ecken. Eine Toleranz von 0 behält alle nicht-kollinearen Vertices.
#[derive(Debug, Clone)]
pub struct PathSimplifier {
    /// Douglas-Peucker-Toleranz im Koordinatenraum der Eingabe
    pub tolerance: f32,
    /// Chaikin-Schnitt-Verhältnis in [0, 0.5]; 0 deaktiviert die Glättung
    pub smooth_factor: f32,
}

impl Default for PathSimplifier {
    fn default() -> Self {
        Self {
            tolerance: 1.1,
            smooth_factor: 0.3,
        }
    }
}

impl PathSimplifier {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    pub fn with_smooth_factor(mut self, factor: f32) -> Self {
        self.smooth_factor = factor.clamp(0.0, 0.5);
        self
    }

    /// Vereinfacht eine rohe Punktfolge und schließt sie zu einem Ring.
    pub fn simplify(&self, points: &[Point2D]) -> DrawResult<Ring> {
        let mut path: Vec<Point2D> = Vec::with_capacity(points.len());
        for &point in points {
            if path
                .last()
                .is_none_or(|last: &Point2D| last.distance(point) > constants::EPSILON)
            {
                path.push(point);
            }
        }

        if path.len() < 3 {
            return Err(DrawError::InsufficientPoints {
                expected: 3,
                actual: path.len(),
            });
        }

        let mut reduced = Self::douglas_peucker(&path, self.tolerance);

        // Kollineare Eingaben kollabieren auf ihre Sehne: die maximale
        // Abweichung ist exakt 0 und nie größer als die Toleranz
        if reduced.len() < 3 {
            return Err(DrawError::DegeneratePolygon {
                reason: "path flattens to a chord at this tolerance".to_string(),
            });
        }

        if !comparison::nearly_zero(self.smooth_factor) {
            reduced = Self::chaikin_closed(&reduced, self.smooth_factor);
        }

        Ring::closed(reduced)
    }

    /// Douglas-Peucker-Reduktion einer offenen Punktfolge
    fn douglas_peucker(points: &[Point2D], epsilon: f32) -> Vec<Point2D> {
        if points.len() <= 2 {
            return points.to_vec();
        }

        // Finde den Punkt mit dem größten Abstand zur Sehne
        let mut max_distance = 0.0;
        let mut max_index = 0;

        let start = points[0];
        let end = points[points.len() - 1];

        for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
            let distance = simple_geometry::point_line_distance(*point, start, end);
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }

        // Rekursiv unterteilen, solange die Abweichung über der Toleranz liegt
        if max_distance > epsilon {
            let mut result1 = Self::douglas_peucker(&points[0..=max_index], epsilon);
            let result2 = Self::douglas_peucker(&points[max_index..], epsilon);

            result1.pop(); // Überschneidungspunkt entfernen
            result1.extend(result2);
            result1
        } else {
            vec![start, end]
        }
    }

    /// Eine Chaikin-Iteration über eine geschlossene Punktfolge
    fn chaikin_closed(vertices: &[Point2D], cut_ratio: f32) -> Vec<Point2D> {
        let n = vertices.len();
        let mut smoothed = Vec::with_capacity(n * 2);

        for i in 0..n {
            let current = vertices[i];
            let next = vertices[(i + 1) % n];

            // Zwei neue Punkte zwischen current und next
            smoothed.push(current + (next - current) * cut_ratio);
            smoothed.push(current + (next - current) * (1.0 - cut_ratio));
        }

        smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_reduces_noisy_path() {
        // Dicht abgetastetes Rechteck mit leichtem Zickzack auf den Kanten
        let mut points = Vec::new();
        for i in 0..=40 {
            let x = i as f32 * 0.5;
            points.push(Point2D::new(x, (i % 2) as f32 * 0.2));
        }
        for i in 0..=40 {
            let y = i as f32 * 0.5;
            points.push(Point2D::new(20.0 + (i % 2) as f32 * 0.2, y));
        }
        for i in (0..=40).rev() {
            let x = i as f32 * 0.5;
            points.push(Point2D::new(x, 20.0 + (i % 2) as f32 * 0.2));
        }

        let simplifier = PathSimplifier::new(1.0).with_smooth_factor(0.0);
        let ring = simplifier.simplify(&points).unwrap();

        assert!(ring.distinct_len() < points.len() / 4);
    }

    #[test]
    fn test_zero_tolerance_keeps_non_collinear_vertices() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 1.0),
            Point2D::new(6.0, 5.0),
            Point2D::new(2.0, 7.0),
            Point2D::new(-1.0, 3.0),
        ];

        let simplifier = PathSimplifier::new(0.0).with_smooth_factor(0.0);
        let ring = simplifier.simplify(&points).unwrap();

        assert_eq!(ring.distinct_len(), points.len());
        for point in &points {
            assert!(ring.distinct_vertices().contains(point));
        }
    }

    #[test]
    fn test_too_few_points_fails() {
        let simplifier = PathSimplifier::default();
        let result = simplifier.simplify(&[Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert!(matches!(
            result,
            Err(DrawError::InsufficientPoints { .. })
        ));
    }

    #[test]
    fn test_collinear_points_fail_as_degenerate() {
        let points: Vec<Point2D> = (0..10).map(|i| Point2D::new(i as f32, i as f32)).collect();
        let simplifier = PathSimplifier::new(0.0).with_smooth_factor(0.0);
        assert!(matches!(
            simplifier.simplify(&points),
            Err(DrawError::DegeneratePolygon { .. })
        ));
    }

    #[test]
    fn test_collinear_points_fail_at_default_tolerance() {
        let points: Vec<Point2D> = (0..10)
            .map(|i| Point2D::new(i as f32 * 3.0, 1.0))
            .collect();
        let simplifier = PathSimplifier::default();
        assert!(matches!(
            simplifier.simplify(&points),
            Err(DrawError::DegeneratePolygon { .. })
        ));
    }

    #[test]
    fn test_smoothing_rounds_corners() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];

        let simplifier = PathSimplifier::new(0.0).with_smooth_factor(0.25);
        let ring = simplifier.simplify(&points).unwrap();

        // Chaikin verdoppelt die Vertex-Anzahl und kappt die Originalecken
        assert_eq!(ring.distinct_len(), 8);
        assert!(!ring.distinct_vertices().contains(&Point2D::new(0.0, 0.0)));
    }
}
