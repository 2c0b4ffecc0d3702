// src/engine/draw.rs

use crate::algorithms::{ConcaveHullComputer, EditAction, EditClassifier, PathSimplifier};
use crate::engine::{
    CreateOptions, DrawSession, MergeEngine, Mode, Polygon, PolygonId, PolygonSet,
};
use crate::error::{DrawError, DrawResult};
use crate::geometry::Ring;
use crate::types::Point2D;
use crate::utils::constants;
use std::fmt;
use tracing::{debug, warn};

/// Grund einer Bestandsänderung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    Create,
    Edit,
    Remove,
    Clear,
}

/// Schnappschuss des Bestands nach einer Mutation.
///
/// Die Ringe beschreiben den vollständigen Zustand nach der Änderung,
/// nicht nur das Delta.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub reason: ChangeReason,
    pub rings: Vec<Ring>,
}

type Subscriber = Box<dyn FnMut(&ChangeEvent)>;

/// Zustandsmaschine des Freihand-Zeichnens für eine Zeichenfläche.
///
/// Die Engine hält den Polygonbestand, den aktiven Modus und eine optionale
/// laufende Eingabesitzung. Jede erfolgreiche Mutation benachrichtigt alle
/// Abonnenten genau einmal, nachdem der Bestand konsistent ist.
pub struct DrawEngine {
    mode: Mode,
    options: CreateOptions,
    store: PolygonSet,
    session: Option<DrawSession>,
    subscribers: Vec<Subscriber>,
    pending_edit_notify: bool,
}

impl fmt::Debug for DrawEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawEngine")
            .field("mode", &self.mode)
            .field("polygons", &self.store.len())
            .field("session", &self.session)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        // Die Default-Optionen bestehen `validate` immer.
        Self {
            mode: Mode::ALL,
            options: CreateOptions::default(),
            store: PolygonSet::new(),
            session: None,
            subscribers: Vec::new(),
            pending_edit_notify: false,
        }
    }
}

impl DrawEngine {
    /// Erstellt eine Engine mit validierten Optionen.
    pub fn new(options: CreateOptions) -> DrawResult<Self> {
        options.validate()?;
        Ok(Self {
            mode: options.mode,
            options,
            ..Self::default()
        })
    }

    // === Modus & Beobachter ===

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Setzt die aktive Modusmaske.
    ///
    /// Verlässt der Aufruf den Edit-Modus und steht eine zurückgehaltene
    /// Edit-Benachrichtigung aus, wird diese jetzt gesendet.
    pub fn set_mode(&mut self, mode: Mode) {
        let leaving_edit = self.mode.intersects(Mode::EDIT_APPEND) && !mode.intersects(Mode::EDIT_APPEND);
        self.mode = mode;
        if leaving_edit && self.pending_edit_notify {
            self.pending_edit_notify = false;
            self.notify(ChangeReason::Edit);
        }
    }

    /// Registriert einen Beobachter für Bestandsänderungen.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&mut self, reason: ChangeReason) {
        if self.subscribers.is_empty() {
            return;
        }
        let event = ChangeEvent {
            reason,
            rings: self.store.rings(),
        };
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    // === Lesender Zugriff ===

    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Kopien aller gespeicherten Ringe in ID-Reihenfolge.
    pub fn all(&self) -> Vec<Ring> {
        self.store.rings()
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon> {
        self.store.get(id)
    }

    pub fn options(&self) -> &CreateOptions {
        &self.options
    }

    // === Erzeugung ===

    /// Verarbeitet einen rohen Punktpfad zur Aufnahme in den Bestand.
    ///
    /// Pipeline: Vereinfachung, optional konkave Hülle, optional Merge mit
    /// überlappenden Bestandspolygonen. Ohne aktives `CREATE`-Bit ist der
    /// Aufruf ein No-Op. Schlägt ein Schritt fehl, bleibt der Bestand
    /// unverändert; erst nach der Kapazitätsprüfung wird mutiert.
    pub fn create(&mut self, points: &[Point2D]) -> DrawResult<Vec<PolygonId>> {
        if !self.mode.contains(Mode::CREATE) {
            debug!("create ignored, CREATE mode not active");
            return Ok(Vec::new());
        }

        let ring = self.validate_candidate(self.build_ring(points)?)?;

        let (replaced, created) = if self.options.merge_polygons {
            let outcome = MergeEngine::new().merge(ring, &self.store)?;
            (outcome.replaced, outcome.created)
        } else {
            (Vec::new(), vec![ring])
        };

        let resulting = self.store.len() - replaced.len() + created.len();
        if let Some(maximum) = self.options.maximum_polygons {
            if resulting > maximum {
                return Err(DrawError::CapacityExceeded {
                    maximum,
                    actual: resulting,
                });
            }
        }

        for id in &replaced {
            self.store.remove(*id);
        }
        let ids: Vec<PolygonId> = created
            .into_iter()
            .map(|ring| self.store.insert(Polygon::new(ring, self.options.clone())))
            .collect();

        if self.options.leave_mode_after_create {
            self.mode = self.mode.without(Mode::CREATE);
        }
        self.notify(ChangeReason::Create);
        Ok(ids)
    }

    fn build_ring(&self, points: &[Point2D]) -> DrawResult<Ring> {
        let simplifier = PathSimplifier::new(self.options.simplify_factor)
            .with_smooth_factor(self.options.smooth_factor);
        let ring = simplifier.simplify(points)?;

        if !self.options.concave_polygon {
            return Ok(ring);
        }

        let computer =
            ConcaveHullComputer::new().with_max_iterations(self.options.hull_max_iterations);
        match computer.compute(&ring) {
            Ok(hull) => Ok(hull),
            Err(DrawError::HullConstruction { reason }) => {
                warn!(%reason, "concave hull failed, keeping simplified outline");
                Ok(ring)
            }
            Err(other) => Err(other),
        }
    }

    /// Kandidaten werden unabhängig vom Merge-Pfad auf einen einfachen
    /// Rand geprüft; gespeicherte Ringe kreuzen sich nie selbst.
    fn validate_candidate(&self, ring: Ring) -> DrawResult<Ring> {
        if !ring.is_simple(constants::GEOM_TOLERANCE) {
            return Err(DrawError::InvalidRing {
                reason: "outline crosses itself".to_string(),
            });
        }
        Ok(ring)
    }

    // === Eingabesitzung ===

    /// Beginnt eine neue Freihand-Sitzung und verwirft eine eventuell
    /// laufende.
    pub fn begin_stroke(&mut self) {
        self.session = Some(DrawSession::new());
    }

    /// Hängt einen Punkt an die laufende Sitzung an; ohne Sitzung ein No-Op.
    pub fn extend_stroke(&mut self, point: Point2D) {
        if let Some(session) = self.session.as_mut() {
            session.push(point);
        }
    }

    /// Schließt die Sitzung ab und führt die Punkte durch `create`.
    ///
    /// Zu kurze oder entartete Eingaben werden stillschweigend verworfen,
    /// da sie bei Freihand-Eingabe ständig vorkommen. Strukturelle Fehler
    /// wie `CapacityExceeded` werden weitergereicht.
    pub fn finish_stroke(&mut self) -> DrawResult<Vec<PolygonId>> {
        let Some(session) = self.session.take() else {
            return Ok(Vec::new());
        };
        match self.create(&session.into_points()) {
            Ok(ids) => Ok(ids),
            Err(DrawError::InsufficientPoints { .. }) | Err(DrawError::DegeneratePolygon { .. }) => {
                debug!("stroke discarded, not enough usable geometry");
                Ok(Vec::new())
            }
            Err(other) => Err(other),
        }
    }

    /// Verwirft die laufende Sitzung ohne Bestandsänderung. Idempotent.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    pub fn has_active_stroke(&self) -> bool {
        self.session.is_some()
    }

    // === Bearbeitung ===

    /// Ordnet einen Zugriffspunkt einer Edit-Aktion auf dem Polygon zu.
    ///
    /// Gibt `None` zurück, wenn weder `EDIT` noch `APPEND` aktiv sind, das
    /// Polygon fehlt oder der Modus die klassifizierte Aktion nicht erlaubt.
    pub fn classify_edit(&self, id: PolygonId, position: Point2D) -> Option<EditAction> {
        if !self.mode.intersects(Mode::EDIT_APPEND) {
            return None;
        }
        let polygon = self.store.get(id)?;
        let classifier = EditClassifier::new(self.options.elbow_distance);
        let action = classifier.classify(
            polygon.ring(),
            position,
            self.mode.contains(Mode::EDIT),
            self.mode.contains(Mode::DELETE),
        );
        match action {
            EditAction::Append { .. } if !self.mode.contains(Mode::APPEND) => None,
            EditAction::Move(_) if !self.mode.contains(Mode::EDIT) => None,
            EditAction::Delete(_) if !self.mode.contains(Mode::DELETE) => None,
            action => Some(action),
        }
    }

    /// Wendet die für `position` klassifizierte Aktion auf das Polygon an.
    ///
    /// Das bearbeitete Polygon wird durch ein neues mit frischer ID ersetzt.
    /// Gibt `Ok(None)` zurück, wenn der Modus keine Aktion zulässt.
    pub fn edit(&mut self, id: PolygonId, position: Point2D) -> DrawResult<Option<PolygonId>> {
        let Some(action) = self.classify_edit(id, position) else {
            return Ok(None);
        };
        let Some(polygon) = self.store.get(id) else {
            return Ok(None);
        };

        let mut vertices = polygon.ring().distinct_vertices().to_vec();
        match action {
            EditAction::Move(index) => vertices[index] = position,
            EditAction::Delete(index) => {
                vertices.remove(index);
            }
            EditAction::Append { after } => vertices.insert(after + 1, position),
        }

        // Erst den neuen Ring bauen, dann mutieren: ein entarteter
        // Bearbeitungsversuch lässt den Bestand unangetastet.
        let ring = Ring::closed(vertices)?;
        let options = polygon.options().clone();
        self.store.remove(id);
        let new_id = self.store.insert(Polygon::new(ring, options));

        if self.options.notify_after_edit_exit {
            self.pending_edit_notify = true;
        } else {
            self.notify(ChangeReason::Edit);
        }
        Ok(Some(new_id))
    }

    // === Entfernen ===

    /// Entfernt ein Polygon, sofern `DELETE` aktiv ist und die ID existiert.
    ///
    /// Eine unbekannte ID ist ein stilles No-Op ohne Benachrichtigung;
    /// benachrichtigt wird nur, wenn sich der Bestand tatsächlich ändert.
    pub fn remove_polygon(&mut self, id: PolygonId) -> bool {
        if !self.mode.contains(Mode::DELETE) {
            debug!("remove ignored, DELETE mode not active");
            return false;
        }
        if self.store.remove(id).is_none() {
            return false;
        }
        self.notify(ChangeReason::Remove);
        true
    }

    /// Leert den Bestand unabhängig vom Modus und bricht eine laufende
    /// Sitzung ab.
    ///
    /// Idempotent: ein bereits leerer Bestand ändert nichts und sendet
    /// daher auch keine weitere Benachrichtigung.
    pub fn clear(&mut self) {
        self.session = None;
        if self.store.is_empty() {
            return;
        }
        self.store.clear();
        self.notify(ChangeReason::Clear);
    }
}
