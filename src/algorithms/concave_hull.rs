// src/algorithms/concave_hull.rs

use crate::geometry::Ring;
use crate::utils::{constants, simple_geometry};
use crate::{error::*, types::*};

/// Konkave Hülle über einen k-Nächste-Nachbarn-Randlauf (Moreira-Santos).
///
/// Beginnend beim niedrigsten Punkt wird wiederholt unter den k nächsten
/// unbesuchten Kandidaten derjenige mit der größten Rechtsdrehung gewählt,
/// der den bisher gebauten Pfad nicht kreuzt. Findet sich kein gültiger
/// Kandidat, wächst k und der Lauf beginnt neu; `max_iterations` begrenzt
/// diese Wachstumsversuche.
#[derive(Debug, Clone)]
pub struct ConcaveHullComputer {
    /// Initiale Nachbarschaftsgröße (mindestens 3)
    pub k_start: usize,
    /// Maximale Anzahl an Wachstumsversuchen bevor die Konstruktion scheitert
    pub max_iterations: usize,
    /// Toleranz für Duplikat- und Randprüfungen
    pub tolerance: f32,
}

impl Default for ConcaveHullComputer {
    fn default() -> Self {
        Self {
            k_start: 3,
            max_iterations: 100,
            tolerance: constants::GEOM_TOLERANCE,
        }
    }
}

impl ConcaveHullComputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k_start(mut self, k: usize) -> Self {
        self.k_start = k.max(3);
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Berechnet die konkave Hülle über die Vertices eines Rings.
    pub fn compute(&self, ring: &Ring) -> DrawResult<Ring> {
        let hull_points = self.compute_points(ring.distinct_vertices())?;
        Ring::closed(hull_points).map_err(|err| DrawError::HullConstruction {
            reason: format!("hull boundary is not a valid ring: {err}"),
        })
    }

    /// Berechnet die konkave Hülle einer Punktmenge.
    pub fn compute_points(&self, input: &[Point2D]) -> DrawResult<Vec<Point2D>> {
        let points = self.dedup(input);

        if points.len() < 3 {
            return Err(DrawError::InsufficientPoints {
                expected: 3,
                actual: points.len(),
            });
        }

        if self.all_collinear(&points) {
            return Err(DrawError::HullConstruction {
                reason: "all points are collinear".to_string(),
            });
        }

        if points.len() == 3 {
            return Ok(points);
        }

        let mut k = self.k_start.max(3).min(points.len() - 1);

        for _ in 0..self.max_iterations {
            if let Some(hull) = self.hull_walk(&points, k) {
                if self.all_points_covered(&points, &hull) {
                    return Ok(hull);
                }
            }

            if k + 1 >= points.len() {
                break;
            }
            k += 1;
        }

        Err(DrawError::HullConstruction {
            reason: "no closing boundary found after exhausting candidate growth".to_string(),
        })
    }

    // === Randlauf ===

    fn hull_walk(&self, points: &[Point2D], k: usize) -> Option<Vec<Point2D>> {
        let n = points.len();
        let first = Self::lowest_point_index(points);

        let mut used = vec![false; n];
        used[first] = true;

        let mut hull = vec![points[first]];
        let mut current = first;
        // Virtueller Vorgänger in +x-Richtung: der erste Schritt folgt dem unteren Rand
        let mut previous_angle = 0.0f32;

        for _ in 0..=n {
            // Ab vier Hull-Punkten darf der Lauf wieder zum Start schließen
            if hull.len() >= 4 {
                used[first] = false;
            }

            let candidates = self.sorted_candidates(points, &used, current, previous_angle, k);

            let next = candidates
                .into_iter()
                .find(|&cand| !self.crosses_hull(&hull, points[current], points[cand]))?;

            if next == first {
                return Some(hull);
            }

            previous_angle = Self::heading(points[next], points[current]);
            hull.push(points[next]);
            used[next] = true;
            current = next;
        }

        None
    }

    /// k nächste unbesuchte Kandidaten, absteigend nach Rechtsdrehung sortiert
    fn sorted_candidates(
        &self,
        points: &[Point2D],
        used: &[bool],
        current: usize,
        previous_angle: f32,
        k: usize,
    ) -> Vec<usize> {
        let origin = points[current];

        let mut nearest: Vec<usize> = (0..points.len())
            .filter(|&i| !used[i] && i != current)
            .collect();
        nearest.sort_by(|&a, &b| {
            origin
                .distance_squared(points[a])
                .partial_cmp(&origin.distance_squared(points[b]))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        nearest.truncate(k);

        nearest.sort_by(|&a, &b| {
            let turn_a = Self::right_turn(previous_angle, Self::heading(origin, points[a]));
            let turn_b = Self::right_turn(previous_angle, Self::heading(origin, points[b]));
            turn_b
                .partial_cmp(&turn_a)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        nearest
    }

    /// Prüft ob das Kandidatensegment eine bestehende Hull-Kante echt kreuzt.
    /// Endpunkt-Berührungen gelten nicht als Kreuzung, damit das Schließen
    /// zum Startpunkt zulässig bleibt.
    fn crosses_hull(&self, hull: &[Point2D], from: Point2D, to: Point2D) -> bool {
        let edge_count = hull.len().saturating_sub(1);

        (0..edge_count).any(|i| {
            simple_geometry::segments_cross_properly(from, to, hull[i], hull[i + 1], self.tolerance)
        })
    }

    // === Hilfsfunktionen ===

    fn lowest_point_index(points: &[Point2D]) -> usize {
        points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.y.partial_cmp(&b.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
            })
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn heading(from: Point2D, to: Point2D) -> f32 {
        (to.y - from.y).atan2(to.x - from.x)
    }

    /// Rechtsdrehung von `base` nach `heading`, normalisiert auf (0, 2π]
    fn right_turn(base: f32, heading: f32) -> f32 {
        let mut turn = (base - heading) % std::f32::consts::TAU;
        if turn <= 0.0 {
            turn += std::f32::consts::TAU;
        }
        turn
    }

    fn dedup(&self, input: &[Point2D]) -> Vec<Point2D> {
        let mut points: Vec<Point2D> = Vec::with_capacity(input.len());
        for &point in input {
            if !points
                .iter()
                .any(|kept| kept.distance(point) <= self.tolerance)
            {
                points.push(point);
            }
        }
        points
    }

    fn all_collinear(&self, points: &[Point2D]) -> bool {
        let first = points[0];
        let second = points[1];
        points[2..]
            .iter()
            .all(|&p| simple_geometry::cross_product(first, second, p).abs() <= self.tolerance)
    }

    fn all_points_covered(&self, points: &[Point2D], hull: &[Point2D]) -> bool {
        points
            .iter()
            .all(|&point| self.point_in_or_on_hull(hull, point))
    }

    fn point_in_or_on_hull(&self, hull: &[Point2D], point: Point2D) -> bool {
        let n = hull.len();

        for i in 0..n {
            let a = hull[i];
            let b = hull[(i + 1) % n];
            if simple_geometry::point_segment_distance(point, a, b) <= self.tolerance {
                return true;
            }
        }

        // Umlaufzahl über den (zyklisch geschlossenen) Hull-Pfad
        let mut winding = 0;
        for i in 0..n {
            let a = hull[i];
            let b = hull[(i + 1) % n];
            if a.y <= point.y {
                if b.y > point.y && simple_geometry::cross_product(a, b, point) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= point.y && simple_geometry::cross_product(a, b, point) < 0.0 {
                winding -= 1;
            }
        }
        winding != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RingProperties;

    #[test]
    fn test_collinear_points_fail() {
        let points: Vec<Point2D> = (0..8).map(|i| Point2D::new(i as f32, 2.0)).collect();

        let computer = ConcaveHullComputer::new();
        assert!(matches!(
            computer.compute_points(&points),
            Err(DrawError::HullConstruction { .. })
        ));
    }

    #[test]
    fn test_exhausted_growth_fails() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
            Point2D::new(5.0, 5.0),
        ];

        let computer = ConcaveHullComputer::new().with_max_iterations(0);
        assert!(matches!(
            computer.compute_points(&points),
            Err(DrawError::HullConstruction { .. })
        ));
    }

    #[test]
    fn test_hull_covers_square_corners() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];

        let computer = ConcaveHullComputer::new();
        let hull = computer.compute_points(&points).unwrap();

        assert!(hull.len() >= 3);
        for point in &points {
            assert!(computer.point_in_or_on_hull(&hull, *point));
        }
    }

    #[test]
    fn test_hull_hugs_l_shaped_cloud_tighter_than_convex() {
        // L-förmige Punktwolke: die konvexe Hülle schlösse die Aussparung ein
        let mut points = Vec::new();
        for x in 0..5 {
            for y in 0..2 {
                points.push(Point2D::new(x as f32 * 10.0, y as f32 * 10.0));
            }
        }
        for x in 0..2 {
            for y in 2..5 {
                points.push(Point2D::new(x as f32 * 10.0, y as f32 * 10.0));
            }
        }

        let computer = ConcaveHullComputer::new();
        let hull = computer.compute_points(&points).unwrap();

        for point in &points {
            assert!(computer.point_in_or_on_hull(&hull, *point));
        }

        // Konvexe Hülle dieser Wolke hätte Fläche 1150
        let ring = Ring::closed(hull).unwrap();
        assert!(ring.area() <= 1150.0 + 1.0);
    }

    #[test]
    fn test_hull_of_ring_produces_ring() {
        let ring = Ring::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(20.0, 0.0),
            Point2D::new(20.0, 20.0),
            Point2D::new(10.0, 12.0),
            Point2D::new(0.0, 20.0),
        ])
        .unwrap();

        let computer = ConcaveHullComputer::new();
        let hull = computer.compute(&ring).unwrap();
        assert!(hull.distinct_len() >= 3);
    }
}
