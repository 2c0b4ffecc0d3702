// src/engine/session.rs

use crate::types::Point2D;
use crate::utils::constants;

/// Laufende Freihand-Eingabe zwischen `begin_stroke` und `finish_stroke`.
///
/// Punkte werden in Eingabereihenfolge gesammelt; unmittelbar aufeinander
/// folgende Duplikate werden bereits hier verworfen.
#[derive(Debug, Default, Clone)]
pub struct DrawSession {
    points: Vec<Point2D>,
}

impl DrawSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point2D) {
        if self
            .points
            .last()
            .is_none_or(|last| last.distance(point) > constants::EPSILON)
        {
            self.points.push(point);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2D> {
        self.points
    }
}
