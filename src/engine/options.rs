// src/engine/options.rs

use crate::engine::Mode;
use crate::error::{DrawError, DrawResult};
use serde::{Deserialize, Serialize};

/// Konfiguration der Erzeugungs-Pipeline und des Engine-Verhaltens.
///
/// Eine Kopie der zum Erzeugungszeitpunkt gültigen Optionen wird an jedem
/// Polygon gespeichert, damit spätere Options-Änderungen bestehende
/// Polygone nicht rückwirkend beeinflussen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Anfangs aktive Modi der Engine.
    pub mode: Mode,
    /// Chaikin-Schnittverhältnis in `[0, 0.5]`, `0` deaktiviert die Glättung.
    pub smooth_factor: f32,
    /// Fangradius um Vertices bei der Edit-Klassifikation.
    pub elbow_distance: f32,
    /// Douglas-Peucker-Toleranz der Pfadvereinfachung.
    pub simplify_factor: f32,
    /// Überlappende Polygone nach dem Erzeugen vereinigen.
    pub merge_polygons: bool,
    /// Konkave Hülle statt des reinen vereinfachten Umrisses berechnen.
    pub concave_polygon: bool,
    /// Obergrenze der gleichzeitig gespeicherten Polygone, `None` = unbegrenzt.
    pub maximum_polygons: Option<usize>,
    /// Strichbreite als Darstellungshinweis für Adapter.
    pub stroke_width: f32,
    /// Nach erfolgreichem Erzeugen das `CREATE`-Bit aus dem Modus entfernen.
    pub leave_mode_after_create: bool,
    /// Edit-Benachrichtigungen erst beim Verlassen des Edit-Modus senden.
    pub notify_after_edit_exit: bool,
    /// Maximale Anzahl k-Wachstums-Versuche der konkaven Hülle.
    pub hull_max_iterations: usize,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            mode: Mode::ALL,
            smooth_factor: 0.3,
            elbow_distance: 10.0,
            simplify_factor: 1.1,
            merge_polygons: true,
            concave_polygon: true,
            maximum_polygons: None,
            stroke_width: 2.0,
            leave_mode_after_create: false,
            notify_after_edit_exit: false,
            hull_max_iterations: 100,
        }
    }
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_smooth_factor(mut self, smooth_factor: f32) -> Self {
        self.smooth_factor = smooth_factor;
        self
    }

    pub fn with_elbow_distance(mut self, elbow_distance: f32) -> Self {
        self.elbow_distance = elbow_distance;
        self
    }

    pub fn with_simplify_factor(mut self, simplify_factor: f32) -> Self {
        self.simplify_factor = simplify_factor;
        self
    }

    pub fn with_merge_polygons(mut self, merge: bool) -> Self {
        self.merge_polygons = merge;
        self
    }

    pub fn with_concave_polygon(mut self, concave: bool) -> Self {
        self.concave_polygon = concave;
        self
    }

    pub fn with_maximum_polygons(mut self, maximum: Option<usize>) -> Self {
        self.maximum_polygons = maximum;
        self
    }

    pub fn with_leave_mode_after_create(mut self, leave: bool) -> Self {
        self.leave_mode_after_create = leave;
        self
    }

    /// Validiert alle numerischen Felder.
    ///
    /// Wird von `DrawEngine::new` aufgerufen, bevor die Optionen übernommen
    /// werden; eine abgelehnte Konfiguration erzeugt keine Engine.
    pub fn validate(&self) -> DrawResult<()> {
        if !self.smooth_factor.is_finite() || !(0.0..=0.5).contains(&self.smooth_factor) {
            return Err(DrawError::InvalidConfiguration {
                message: format!(
                    "smooth_factor must lie in [0, 0.5], got {}",
                    self.smooth_factor
                ),
            });
        }
        if !self.elbow_distance.is_finite() || self.elbow_distance < 0.0 {
            return Err(DrawError::InvalidConfiguration {
                message: format!(
                    "elbow_distance must be non-negative, got {}",
                    self.elbow_distance
                ),
            });
        }
        if !self.simplify_factor.is_finite() || self.simplify_factor < 0.0 {
            return Err(DrawError::InvalidConfiguration {
                message: format!(
                    "simplify_factor must be non-negative, got {}",
                    self.simplify_factor
                ),
            });
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(DrawError::InvalidConfiguration {
                message: format!("stroke_width must be positive, got {}", self.stroke_width),
            });
        }
        Ok(())
    }
}
