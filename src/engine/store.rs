// src/engine/store.rs

use crate::engine::CreateOptions;
use crate::geometry::Ring;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Eindeutiger, monoton vergebener Schlüssel eines gespeicherten Polygons.
///
/// IDs werden niemals wiederverwendet, auch nicht nach `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolygonId(u64);

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ein gespeichertes Polygon samt der Optionen seines Erzeugungszeitpunkts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    ring: Ring,
    options: CreateOptions,
}

impl Polygon {
    pub fn new(ring: Ring, options: CreateOptions) -> Self {
        Self { ring, options }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn options(&self) -> &CreateOptions {
        &self.options
    }
}

/// Polygonbestand einer Zeichenfläche.
#[derive(Debug, Default, Clone)]
pub struct PolygonSet {
    polygons: HashMap<PolygonId, Polygon>,
    next_id: u64,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nimmt ein Polygon auf und vergibt die nächste freie ID.
    pub fn insert(&mut self, polygon: Polygon) -> PolygonId {
        let id = PolygonId(self.next_id);
        self.next_id += 1;
        self.polygons.insert(id, polygon);
        id
    }

    pub fn remove(&mut self, id: PolygonId) -> Option<Polygon> {
        self.polygons.remove(&id)
    }

    /// Entfernt alle Polygone; bereits vergebene IDs bleiben verbraucht.
    pub fn clear(&mut self) {
        self.polygons.clear();
    }

    pub fn get(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(&id)
    }

    pub fn contains(&self, id: PolygonId) -> bool {
        self.polygons.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PolygonId, &Polygon)> {
        self.polygons.iter().map(|(id, polygon)| (*id, polygon))
    }

    /// Kopien aller Ringe, sortiert nach ID für deterministische Reihenfolge.
    pub fn rings(&self) -> Vec<Ring> {
        let mut ids: Vec<PolygonId> = self.polygons.keys().copied().collect();
        ids.sort();
        ids.iter()
            .filter_map(|id| self.polygons.get(id))
            .map(|polygon| polygon.ring.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point2D;

    fn square(offset: f32) -> Ring {
        Ring::closed(vec![
            Point2D::new(offset, offset),
            Point2D::new(offset + 10.0, offset),
            Point2D::new(offset + 10.0, offset + 10.0),
            Point2D::new(offset, offset + 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn ids_are_never_reused() {
        let mut set = PolygonSet::new();
        let first = set.insert(Polygon::new(square(0.0), CreateOptions::default()));
        set.remove(first);
        set.clear();
        let second = set.insert(Polygon::new(square(1.0), CreateOptions::default()));
        assert_ne!(first, second);
    }

    #[test]
    fn remove_returns_stored_polygon() {
        let mut set = PolygonSet::new();
        let id = set.insert(Polygon::new(square(0.0), CreateOptions::default()));
        assert_eq!(set.len(), 1);
        let removed = set.remove(id).unwrap();
        assert_eq!(removed.ring(), &square(0.0));
        assert!(set.is_empty());
        assert!(set.remove(id).is_none());
    }

    #[test]
    fn rings_are_sorted_by_id() {
        let mut set = PolygonSet::new();
        set.insert(Polygon::new(square(0.0), CreateOptions::default()));
        set.insert(Polygon::new(square(20.0), CreateOptions::default()));
        set.insert(Polygon::new(square(40.0), CreateOptions::default()));
        let rings = set.rings();
        assert_eq!(rings[0], square(0.0));
        assert_eq!(rings[2], square(40.0));
    }
}
