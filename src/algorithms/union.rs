// src/algorithms/union.rs

use crate::error::*;
use crate::geometry::{Orientation, Ring, RingProperties};
use crate::types::Point2D;
use crate::utils::{constants, simple_geometry};

/// Boolesche Vereinigung von Polygon-Ringen unter der Non-Zero-Winding-Regel.
///
/// Alle Kanten werden an ihren Kreuzungen mit fremden Ringen aufgeteilt;
/// ein Teilsegment gehört genau dann zum Rand der Vereinigung, wenn exakt
/// eine seiner beiden Seiten im Inneren (Umlaufzahl != 0 bezüglich
/// irgendeines Rings) liegt. Die überlebenden Segmente werden anschließend
/// zu geschlossenen Ausgaberingen zusammengesetzt. Das Ergebnis kann aus
/// mehreren disjunkten Ringen bestehen; Lochränder werden verworfen, da
/// Polygone genau einen Außenring besitzen.
#[derive(Debug, Clone)]
pub struct RingUnion {
    tolerance: f32,
}

impl Default for RingUnion {
    fn default() -> Self {
        Self {
            tolerance: constants::GEOM_TOLERANCE,
        }
    }
}

/// Gerichtetes Randsegment mit dem Index seines Ursprungsrings
#[derive(Debug, Clone, Copy)]
struct BoundarySegment {
    ring: usize,
    start: Point2D,
    end: Point2D,
}

impl RingUnion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Vereinigt eine Menge von Ringen zu einem oder mehreren disjunkten Ringen.
    ///
    /// Selbstschneidende Eingaberinge werden mit `InvalidRing` abgelehnt;
    /// Eingaben mit Fläche Null kann der `Ring`-Typ nicht darstellen.
    pub fn union(&self, rings: &[Ring]) -> DrawResult<Vec<Ring>> {
        if rings.is_empty() {
            return Ok(Vec::new());
        }

        // Einheitliche Umlaufrichtung gegen den Uhrzeigersinn
        let rings: Vec<Ring> = rings
            .iter()
            .map(|ring| match ring.orientation() {
                Orientation::CounterClockwise => ring.clone(),
                Orientation::Clockwise => ring.reversed(),
            })
            .collect();

        for ring in &rings {
            self.validate_simple(ring)?;
        }

        if rings.len() == 1 {
            return Ok(rings);
        }

        let segments = self.split_at_crossings(&rings);
        let kept = self.keep_boundary_segments(&rings, &segments);
        let paths = self.stitch(kept)?;

        // Lochränder laufen im Uhrzeigersinn und werden verworfen
        let mut result = Vec::new();
        for path in paths {
            if Ring::shoelace_doubled(&path) * 0.5 <= self.tolerance {
                continue;
            }
            let ring = Ring::closed(path).map_err(|err| DrawError::InvalidRing {
                reason: format!("union produced a degenerate boundary: {err}"),
            })?;
            result.push(ring);
        }

        if result.is_empty() {
            return Err(DrawError::InvalidRing {
                reason: "union produced no outer boundary".to_string(),
            });
        }

        Ok(result)
    }

    // === Aufteilen ===

    fn split_at_crossings(&self, rings: &[Ring]) -> Vec<BoundarySegment> {
        let mut segments = Vec::new();

        for (i, ring) in rings.iter().enumerate() {
            for (a, b) in ring.edges() {
                let eps = simple_geometry::parameter_epsilon(a, b, self.tolerance);
                let mut cuts = vec![0.0f32, 1.0];

                for (j, other) in rings.iter().enumerate() {
                    if j == i {
                        continue;
                    }
                    for (c, d) in other.edges() {
                        if let Some((_, t, _)) = simple_geometry::segment_intersection_params(
                            a,
                            b,
                            c,
                            d,
                            constants::EPSILON,
                        ) {
                            if t > eps && t < 1.0 - eps {
                                cuts.push(t);
                            }
                        }
                    }

                    // Fremde Vertices auf der Kante erzeugen ebenfalls
                    // Schnittstellen (T-Stöße, kollinear überlappende Kanten)
                    for &vertex in other.distinct_vertices() {
                        if simple_geometry::point_segment_distance(vertex, a, b) <= self.tolerance {
                            let t = (vertex - a).dot(b - a) / (b - a).length_squared();
                            if t > eps && t < 1.0 - eps {
                                cuts.push(t);
                            }
                        }
                    }
                }

                cuts.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
                cuts.dedup_by(|x, y| (*x - *y).abs() < eps);

                for pair in cuts.windows(2) {
                    let start = a + (b - a) * pair[0];
                    let end = a + (b - a) * pair[1];
                    if start.distance(end) > self.tolerance {
                        segments.push(BoundarySegment {
                            ring: i,
                            start,
                            end,
                        });
                    }
                }
            }
        }

        segments
    }

    // === Klassifikation ===

    fn keep_boundary_segments(
        &self,
        rings: &[Ring],
        segments: &[BoundarySegment],
    ) -> Vec<BoundarySegment> {
        let mut kept = Vec::new();

        'segments: for segment in segments {
            let mid = (segment.start + segment.end) * 0.5;

            // Deckungsgleiche Randstücke: nur die Kopie des Rings mit dem
            // kleinsten Index überlebt die Seitenprüfung
            for (j, other) in rings.iter().enumerate() {
                if j < segment.ring && other.on_boundary(mid, self.tolerance) {
                    continue 'segments;
                }
            }

            // Randsegment der Vereinigung: genau eine Seite liegt innen
            let direction = (segment.end - segment.start).normalize_or_zero();
            let normal = Point2D::new(-direction.y, direction.x);
            let delta = self.tolerance * 8.0;

            let left_inside = self.inside_union(rings, mid + normal * delta);
            let right_inside = self.inside_union(rings, mid - normal * delta);

            if left_inside != right_inside {
                kept.push(*segment);
            }
        }

        kept
    }

    fn inside_union(&self, rings: &[Ring], point: Point2D) -> bool {
        rings.iter().any(|ring| {
            ring.winding_number(point) != 0 || ring.on_boundary(point, self.tolerance)
        })
    }

    // === Zusammensetzen ===

    fn stitch(&self, segments: Vec<BoundarySegment>) -> DrawResult<Vec<Vec<Point2D>>> {
        let mut used = vec![false; segments.len()];
        let mut paths = Vec::new();

        for start_index in 0..segments.len() {
            if used[start_index] {
                continue;
            }
            used[start_index] = true;

            let origin = segments[start_index].start;
            let mut cursor = segments[start_index].end;
            let mut path = vec![origin, cursor];

            loop {
                if cursor.distance(origin) <= self.tolerance {
                    path.pop(); // Abschlusspunkt fällt mit dem Ursprung zusammen
                    break;
                }

                // Nächstes unbenutztes Segment, das am Cursor beginnt
                let mut best: Option<(usize, f32)> = None;
                for (i, segment) in segments.iter().enumerate() {
                    if used[i] {
                        continue;
                    }
                    let gap = segment.start.distance(cursor);
                    if gap <= self.tolerance && best.is_none_or(|(_, d)| gap < d) {
                        best = Some((i, gap));
                    }
                }

                let Some((next_index, _)) = best else {
                    return Err(DrawError::InvalidRing {
                        reason: "open boundary while stitching union result".to_string(),
                    });
                };

                used[next_index] = true;
                cursor = segments[next_index].end;
                path.push(cursor);
            }

            if path.len() >= 3 {
                paths.push(path);
            }
        }

        Ok(paths)
    }

    // === Validierung ===

    /// Lehnt selbstschneidende Ringe ab (echte Kreuzung zweier Kanten)
    fn validate_simple(&self, ring: &Ring) -> DrawResult<()> {
        if !ring.is_simple(self.tolerance) {
            return Err(DrawError::InvalidRing {
                reason: "ring is self-intersecting".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(min_x: f32, min_y: f32, size: f32) -> Ring {
        Ring::closed(vec![
            Point2D::new(min_x, min_y),
            Point2D::new(min_x + size, min_y),
            Point2D::new(min_x + size, min_y + size),
            Point2D::new(min_x, min_y + size),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_ring_passes_through() {
        let engine = RingUnion::new();
        let result = engine.union(&[square(0.0, 0.0, 10.0)]).unwrap();

        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), 100.0);
    }

    #[test]
    fn test_union_of_overlapping_squares_is_l_shape() {
        let engine = RingUnion::new();
        let result = engine
            .union(&[square(0.0, 0.0, 10.0), square(5.0, 5.0, 10.0)])
            .unwrap();

        assert_eq!(result.len(), 1);
        // 100 + 100 - 25 Überlappung
        assert_relative_eq!(result[0].area(), 175.0, epsilon = 0.01);
        assert_eq!(result[0].orientation(), Orientation::CounterClockwise);
    }

    #[test]
    fn test_union_of_contained_ring_is_outer_ring() {
        let engine = RingUnion::new();
        let result = engine
            .union(&[square(0.0, 0.0, 20.0), square(5.0, 5.0, 5.0)])
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), 400.0, epsilon = 0.01);
    }

    #[test]
    fn test_union_of_identical_rings_is_one_ring() {
        let engine = RingUnion::new();
        let result = engine
            .union(&[square(0.0, 0.0, 10.0), square(0.0, 0.0, 10.0)])
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_union_of_three_chained_squares() {
        let engine = RingUnion::new();
        let result = engine
            .union(&[
                square(0.0, 0.0, 10.0),
                square(6.0, 0.0, 10.0),
                square(12.0, 0.0, 10.0),
            ])
            .unwrap();

        assert_eq!(result.len(), 1);
        // Drei Quadrate, Kette überdeckt x in [0, 22] bei voller Höhe
        assert_relative_eq!(result[0].area(), 220.0, epsilon = 0.01);
    }

    #[test]
    fn test_self_intersecting_input_is_rejected() {
        let bowtie = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 20.0),
        ])
        .unwrap();

        let engine = RingUnion::new();
        let result = engine.union(&[bowtie, square(30.0, 30.0, 5.0)]);
        assert!(matches!(result, Err(DrawError::InvalidRing { .. })));
    }

    #[test]
    fn test_clockwise_input_is_normalized() {
        let engine = RingUnion::new();
        let cw = square(5.0, 5.0, 10.0).reversed();
        let result = engine.union(&[square(0.0, 0.0, 10.0), cw]).unwrap();

        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), 175.0, epsilon = 0.01);
    }
}
