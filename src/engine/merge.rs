// src/engine/merge.rs

use crate::algorithms::{IntersectionAnalyzer, RingUnion};
use crate::engine::{PolygonId, PolygonSet};
use crate::error::DrawResult;
use crate::geometry::Ring;
use tracing::trace;

/// Ergebnis eines Merge-Durchlaufs.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// IDs der Bestandspolygone, die durch das Ergebnis ersetzt werden.
    pub replaced: Vec<PolygonId>,
    /// Ringe, die an deren Stelle eingefügt werden sollen.
    pub created: Vec<Ring>,
}

/// Vereinigt einen Kandidatenring mit allen überlappenden Bestandspolygonen.
///
/// Es findet genau ein Durchlauf statt: die Vereinigungsergebnisse werden
/// nicht erneut gegen den Bestand geprüft. Da der Bestand vor dem Merge
/// paarweise überlappungsfrei ist, kann ein Ergebnisring auch nur dort
/// liegen, wo Kandidat oder ersetzte Polygone bereits lagen.
#[derive(Debug, Clone)]
pub struct MergeEngine {
    analyzer: IntersectionAnalyzer,
    union: RingUnion,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self {
            analyzer: IntersectionAnalyzer::new(),
            union: RingUnion::new(),
        }
    }
}

impl MergeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&self, candidate: Ring, store: &PolygonSet) -> DrawResult<MergeOutcome> {
        let mut replaced: Vec<PolygonId> = store
            .iter()
            .filter(|(_, polygon)| self.analyzer.intersects(&candidate, polygon.ring()))
            .map(|(id, _)| id)
            .collect();
        replaced.sort();

        if replaced.is_empty() {
            return Ok(MergeOutcome {
                replaced,
                created: vec![candidate],
            });
        }

        trace!(
            group_size = replaced.len() + 1,
            "merging candidate with overlapping polygons"
        );

        let mut group = Vec::with_capacity(replaced.len() + 1);
        group.push(candidate);
        for id in &replaced {
            if let Some(polygon) = store.get(*id) {
                group.push(polygon.ring().clone());
            }
        }

        let created = self.union.union(&group)?;
        Ok(MergeOutcome { replaced, created })
    }
}
