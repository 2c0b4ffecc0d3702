// src/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    /// Toleranz für geometrische Vergleiche im Pixel-Koordinatenraum
    pub const GEOM_TOLERANCE: f32 = EPSILON * 1000.0;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f32) -> bool {
        a.abs() < EPSILON
    }
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use crate::types::Point2D;

    /// Berechnet das Kreuzprodukt zweier 2D-Vektoren (Skalar)
    pub fn cross_product_2d(a: Point2D, b: Point2D) -> f32 {
        a.x * b.y - a.y * b.x
    }

    /// Vorzeichenbehaftetes Kreuzprodukt des Tripels (a, b, c)
    pub fn cross_product(a: Point2D, b: Point2D, c: Point2D) -> f32 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// Projiziert einen Punkt auf ein Liniensegment (geklemmt auf die Endpunkte)
    pub fn project_point_on_segment(
        point: Point2D,
        segment_start: Point2D,
        segment_end: Point2D,
    ) -> Point2D {
        let segment_vec = segment_end - segment_start;
        let length_sq = segment_vec.length_squared();
        if length_sq < super::constants::EPSILON {
            return segment_start;
        }

        let t = ((point - segment_start).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
        segment_start + segment_vec * t
    }

    /// Berechnet den Abstand von einem Punkt zu einem Liniensegment
    pub fn point_segment_distance(
        point: Point2D,
        segment_start: Point2D,
        segment_end: Point2D,
    ) -> f32 {
        point.distance(project_point_on_segment(point, segment_start, segment_end))
    }

    /// Berechnet den senkrechten Abstand eines Punktes zur Geraden durch zwei Punkte
    pub fn point_line_distance(point: Point2D, line_start: Point2D, line_end: Point2D) -> f32 {
        let line_vec = line_end - line_start;
        let point_vec = point - line_start;

        let line_length = line_vec.length();
        if line_length < super::constants::EPSILON {
            return point_vec.length();
        }

        cross_product_2d(line_vec, point_vec).abs() / line_length
    }

    /// Schnittpunkt zweier Liniensegmente mit Parametern (t entlang a, u entlang b)
    pub fn segment_intersection_params(
        a1: Point2D,
        a2: Point2D,
        b1: Point2D,
        b2: Point2D,
        tolerance: f32,
    ) -> Option<(Point2D, f32, f32)> {
        let d1 = a2 - a1;
        let d2 = b2 - b1;

        let denominator = cross_product_2d(d1, d2);
        if denominator.abs() < tolerance {
            return None; // Parallele Segmente
        }

        let d = b1 - a1;
        let t = cross_product_2d(d, d2) / denominator;
        let u = cross_product_2d(d, d1) / denominator;

        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some((a1 + d1 * t, t, u))
        } else {
            None
        }
    }

    /// Prüft ob zwei Segmente sich echt schneiden (Schnittpunkt im Inneren beider Segmente)
    pub fn segments_cross_properly(
        a1: Point2D,
        a2: Point2D,
        b1: Point2D,
        b2: Point2D,
        tolerance: f32,
    ) -> bool {
        let eps_a = parameter_epsilon(a1, a2, tolerance);
        let eps_b = parameter_epsilon(b1, b2, tolerance);

        match segment_intersection_params(a1, a2, b1, b2, super::constants::EPSILON) {
            Some((_, t, u)) => t > eps_a && t < 1.0 - eps_a && u > eps_b && u < 1.0 - eps_b,
            None => false,
        }
    }

    /// Toleranz im Parameterraum eines Segments (Pixel-Toleranz / Segmentlänge)
    pub fn parameter_epsilon(start: Point2D, end: Point2D, tolerance: f32) -> f32 {
        let length = start.distance(end);
        if length < super::constants::EPSILON {
            1.0
        } else {
            tolerance / length
        }
    }
}
