// src/geometry/ring.rs

use crate::utils::{constants, simple_geometry};
use crate::{error::*, types::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geschlossener, einfacher Polygonzug.
///
/// Invarianten: erster und letzter Vertex sind identisch (explizit
/// geschlossen), keine aufeinanderfolgenden Duplikate, mindestens drei
/// verschiedene Vertices, eingeschlossene Fläche ungleich Null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    vertices: Vec<Point2D>,
}

impl Ring {
    /// Erstellt einen geschlossenen Ring aus Vertices.
    ///
    /// Ein bereits vorhandener Abschlusspunkt (erster == letzter) wird
    /// erkannt; andernfalls wird der Ring automatisch geschlossen.
    pub fn closed(vertices: Vec<Point2D>) -> DrawResult<Self> {
        let mut distinct = Vec::with_capacity(vertices.len());

        for vertex in vertices {
            if distinct
                .last()
                .is_none_or(|last: &Point2D| last.distance(vertex) > constants::EPSILON)
            {
                distinct.push(vertex);
            }
        }

        // Abschluss-Duplikat entfernen, falls der Aufrufer bereits geschlossen hat
        if distinct.len() > 1 {
            let first = distinct[0];
            if distinct
                .last()
                .is_some_and(|last| last.distance(first) <= constants::EPSILON)
            {
                distinct.pop();
            }
        }

        if distinct.len() < 3 {
            return Err(DrawError::InsufficientPoints {
                expected: 3,
                actual: distinct.len(),
            });
        }

        if Self::shoelace_doubled(&distinct).abs() < constants::EPSILON {
            return Err(DrawError::DegeneratePolygon {
                reason: "enclosed area is zero".to_string(),
            });
        }

        distinct.push(distinct[0]);
        Ok(Self { vertices: distinct })
    }

    /// Zugriff auf die Vertices (inklusive Abschluss-Duplikat)
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Vertices ohne das Abschluss-Duplikat
    pub fn distinct_vertices(&self) -> &[Point2D] {
        &self.vertices[..self.vertices.len() - 1]
    }

    /// Anzahl der verschiedenen Vertices
    pub fn distinct_len(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Iteriert über die gerichteten Kanten des Rings
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Prüft ob keine zwei Kanten sich echt kreuzen.
    ///
    /// Rand-Berührungen an gemeinsamen Endpunkten zählen nicht als
    /// Kreuzung.
    pub fn is_simple(&self, tolerance: f32) -> bool {
        let edges: Vec<(Point2D, Point2D)> = self.edges().collect();

        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (a1, a2) = edges[i];
                let (b1, b2) = edges[j];
                if simple_geometry::segments_cross_properly(a1, a2, b1, b2, tolerance) {
                    return false;
                }
            }
        }

        true
    }

    /// Erstellt eine Kopie mit umgekehrter Umlaufrichtung
    pub fn reversed(&self) -> Self {
        let mut reversed: Vec<Point2D> = self.distinct_vertices().to_vec();
        reversed.reverse();
        reversed.push(reversed[0]);
        Self { vertices: reversed }
    }

    /// Doppelte vorzeichenbehaftete Fläche (Shoelace) über verschiedene Vertices
    pub(crate) fn shoelace_doubled(distinct: &[Point2D]) -> f32 {
        let n = distinct.len();
        let mut area_sum = 0.0;
        for i in 0..n {
            let p1 = distinct[i];
            let p2 = distinct[(i + 1) % n];
            area_sum += (p1.x * p2.y) - (p2.x * p1.y);
        }
        area_sum
    }
}

/// Display-Implementierung für Debugging
impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ring({} vertices, closed)", self.distinct_len())
    }
}

/// Konvertierung von Vec<Point2D>
impl TryFrom<Vec<Point2D>> for Ring {
    type Error = DrawError;

    fn try_from(vertices: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::closed(vertices)
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_closes_automatically() {
        let ring = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(1.0, 2.0),
        ])
        .unwrap();

        assert_eq!(ring.distinct_len(), 3);
        assert_eq!(ring.vertices().first(), ring.vertices().last());
    }

    #[test]
    fn test_ring_accepts_preclosed_input() {
        let ring = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(1.0, 2.0),
            Point2D::new(0.0, 0.0),
        ])
        .unwrap();

        assert_eq!(ring.distinct_len(), 3);
    }

    #[test]
    fn test_ring_drops_consecutive_duplicates() {
        let ring = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(1.0, 2.0),
        ])
        .unwrap();

        assert_eq!(ring.distinct_len(), 3);
    }

    #[test]
    fn test_ring_rejects_too_few_points() {
        let result = Ring::closed(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]);
        assert!(matches!(
            result,
            Err(DrawError::InsufficientPoints { expected: 3, .. })
        ));
    }

    #[test]
    fn test_ring_rejects_collinear_points() {
        let result = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(3.0, 3.0),
        ]);
        assert!(matches!(result, Err(DrawError::DegeneratePolygon { .. })));
    }

    #[test]
    fn test_is_simple_detects_crossing_edges() {
        let bowtie = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 20.0),
        ])
        .unwrap();
        assert!(!bowtie.is_simple(1e-3));

        let triangle = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(5.0, 8.0),
        ])
        .unwrap();
        assert!(triangle.is_simple(1e-3));
    }

    #[test]
    fn test_ring_edges_count() {
        let ring = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
        ])
        .unwrap();

        assert_eq!(ring.edges().count(), 4);
    }
}
