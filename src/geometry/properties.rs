// src/geometry/properties.rs

use crate::geometry::ring::Ring;
use crate::types::{Bounds2D, Point2D};
use crate::utils::{constants, simple_geometry};

/// Gibt die Umlaufrichtung eines Rings an.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

/// Trait für geometrische Eigenschaften geschlossener Ringe.
pub trait RingProperties {
    /// Vorzeichenbehaftete Fläche (Shoelace-Formel, positiv bei Umlauf gegen den Uhrzeigersinn)
    fn signed_area(&self) -> f32;

    /// Absolutwert der eingeschlossenen Fläche
    fn area(&self) -> f32;

    /// Umfang des Rings
    fn perimeter(&self) -> f32;

    /// Umlaufrichtung, basierend auf dem Vorzeichen der Fläche
    fn orientation(&self) -> Orientation;

    /// Achsenparallele Bounding Box
    fn bounds(&self) -> Bounds2D;

    /// Arithmetischer Schwerpunkt der Vertices
    fn centroid(&self) -> Point2D;

    /// Umlaufzahl eines Punktes bezüglich des Rings (Non-Zero-Winding-Regel)
    fn winding_number(&self, point: Point2D) -> i32;

    /// Prüft ob ein Punkt auf dem Rand des Rings liegt (innerhalb der Toleranz)
    fn on_boundary(&self, point: Point2D, tolerance: f32) -> bool;

    /// Prüft ob ein Punkt echt im Inneren liegt (Umlaufzahl != 0, nicht auf dem Rand)
    fn contains_point(&self, point: Point2D) -> bool;

    /// Liefert einen garantiert im Inneren liegenden Punkt (Scanline durch die Mitte)
    fn representative_point(&self) -> Point2D;
}

impl RingProperties for Ring {
    fn signed_area(&self) -> f32 {
        Ring::shoelace_doubled(self.distinct_vertices()) * 0.5
    }

    fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    fn perimeter(&self) -> f32 {
        self.edges().map(|(a, b)| a.distance(b)).sum()
    }

    fn orientation(&self) -> Orientation {
        if self.signed_area() >= 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    fn bounds(&self) -> Bounds2D {
        // Ein valider Ring hat immer mindestens drei Vertices
        Bounds2D::from_points_iter(self.distinct_vertices().iter().copied())
            .unwrap_or(Bounds2D::from_points(Point2D::ZERO, Point2D::ZERO))
    }

    fn centroid(&self) -> Point2D {
        let distinct = self.distinct_vertices();
        let sum = distinct.iter().fold(Point2D::ZERO, |acc, v| acc + *v);
        sum / distinct.len() as f32
    }

    fn winding_number(&self, point: Point2D) -> i32 {
        let mut winding = 0;

        for (a, b) in self.edges() {
            if a.y <= point.y {
                if b.y > point.y && simple_geometry::cross_product(a, b, point) > 0.0 {
                    winding += 1; // Aufwärtskreuzung, Punkt links der Kante
                }
            } else if b.y <= point.y && simple_geometry::cross_product(a, b, point) < 0.0 {
                winding -= 1; // Abwärtskreuzung, Punkt rechts der Kante
            }
        }

        winding
    }

    fn on_boundary(&self, point: Point2D, tolerance: f32) -> bool {
        self.edges()
            .any(|(a, b)| simple_geometry::point_segment_distance(point, a, b) <= tolerance)
    }

    fn contains_point(&self, point: Point2D) -> bool {
        if self.on_boundary(point, constants::GEOM_TOLERANCE) {
            return false;
        }
        self.winding_number(point) != 0
    }

    fn representative_point(&self) -> Point2D {
        let bounds = self.bounds();
        let mut scan_y = (bounds.min.y + bounds.max.y) * 0.5;

        // Scanline darf durch keinen Vertex laufen, sonst sind Kreuzungen mehrdeutig
        let mut offset = bounds.height() * 1e-3 + constants::EPSILON;
        for _ in 0..16 {
            let hits_vertex = self
                .distinct_vertices()
                .iter()
                .any(|v| (v.y - scan_y).abs() < constants::EPSILON);
            if !hits_vertex {
                break;
            }
            scan_y += offset;
            offset *= 1.7;
        }

        let mut crossings: Vec<f32> = self
            .edges()
            .filter(|(a, b)| (a.y > scan_y) != (b.y > scan_y))
            .map(|(a, b)| a.x + (scan_y - a.y) * (b.x - a.x) / (b.y - a.y))
            .collect();

        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        if crossings.len() >= 2 {
            Point2D::new((crossings[0] + crossings[1]) * 0.5, scan_y)
        } else {
            self.centroid()
        }
    }
}
