// src/algorithms/edit.rs

use crate::geometry::Ring;
use crate::types::Point2D;
use crate::utils::simple_geometry;

/// Ergebnis der Klassifikation einer Zieh-Interaktion im Edit-Modus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Bestehenden Vertex an diesem Index verschieben
    Move(usize),
    /// Bestehenden Vertex an diesem Index entfernen
    Delete(usize),
    /// Neuen Vertex hinter diesem Kanten-Index einfügen
    Append { after: usize },
}

/// Reine Entscheidungsfunktion für Edit-Interaktionen.
///
/// Liegt der Zielpunkt innerhalb der Ellbogen-Distanz eines bestehenden
/// Vertex, wird dieser Vertex bearbeitet (verschoben oder entfernt);
/// andernfalls wird ein neuer Vertex an der nächstgelegenen Kante
/// eingefügt. Greift nie auf den Polygon-Store zu.
#[derive(Debug, Clone)]
pub struct EditClassifier {
    /// Pixel-Schwellwert zwischen "Vertex bearbeiten" und "Vertex einfügen"
    pub elbow_distance: f32,
}

impl EditClassifier {
    pub fn new(elbow_distance: f32) -> Self {
        Self { elbow_distance }
    }

    /// Klassifiziert einen Zieh-Punkt gegen einen bestehenden Ring.
    ///
    /// `move_allowed` und `delete_allowed` leitet der Aufrufer aus dem
    /// aktuellen Modus ab (EDIT- bzw. DELETE-Bit). Verschieben hat
    /// Vorrang: Löschen greift nur, wenn Verschieben nicht erlaubt ist
    /// und der Ring nicht unter drei verschiedene Vertices schrumpft.
    pub fn classify(
        &self,
        ring: &Ring,
        drag: Point2D,
        move_allowed: bool,
        delete_allowed: bool,
    ) -> EditAction {
        let (nearest_index, nearest_distance) = Self::nearest_vertex(ring, drag);

        if nearest_distance <= self.elbow_distance {
            if !move_allowed && delete_allowed && ring.distinct_len() > 3 {
                return EditAction::Delete(nearest_index);
            }
            return EditAction::Move(nearest_index);
        }

        EditAction::Append {
            after: Self::nearest_edge(ring, drag),
        }
    }

    fn nearest_vertex(ring: &Ring, drag: Point2D) -> (usize, f32) {
        let mut nearest_index = 0;
        let mut nearest_distance = f32::INFINITY;

        for (i, vertex) in ring.distinct_vertices().iter().enumerate() {
            let distance = vertex.distance(drag);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_index = i;
            }
        }

        (nearest_index, nearest_distance)
    }

    fn nearest_edge(ring: &Ring, drag: Point2D) -> usize {
        let mut nearest_index = 0;
        let mut nearest_distance = f32::INFINITY;

        for (i, (a, b)) in ring.edges().enumerate() {
            let distance = simple_geometry::point_segment_distance(drag, a, b);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_index = i;
            }
        }

        nearest_index
    }
}
