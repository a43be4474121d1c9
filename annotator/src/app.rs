//! Application facade tying storage, store, draw session and map view together.

use annotator_types::{AnnotationKind, LngLat};

use crate::clock::{Clock, SystemClock};
use crate::config::MapInitConfig;
use crate::controls::{control_groups, ControlAction, ControlGroup, Tooltip};
use crate::error::AnnotatorError;
use crate::session::{Commit, DrawSession};
use crate::storage::KeyValueStorage;
use crate::store::AnnotationStore;
use crate::view::{Cursor, LayerVisibility, ListenerTarget, MapEngine, MapEvent, MapViewBinding};

/// Map annotator.
///
/// All user input goes through [`Annotator::press`] (control panel buttons) and
/// [`Annotator::handle_map_event`] (pointer events from the engine). Each call
/// writes through to the storage first, then updates the in-memory lists, then
/// pushes the affected layer to the engine, all before returning. If the write
/// fails, neither the lists nor the layers change.
pub struct Annotator<S, E, C = SystemClock>
where
    S: KeyValueStorage,
    E: MapEngine,
    C: Clock,
{
    config: MapInitConfig,
    storage: S,
    store: AnnotationStore,
    session: DrawSession,
    view: MapViewBinding<E>,
    clock: C,
}

impl<S, E> Annotator<S, E>
where
    S: KeyValueStorage,
    E: MapEngine,
{
    /// Loads the stored annotations and creates an annotator using the system
    /// clock for creation dates.
    pub fn new(config: MapInitConfig, storage: S, engine: E) -> Result<Self, AnnotatorError> {
        Self::with_clock(config, storage, engine, SystemClock)
    }
}

impl<S, E, C> Annotator<S, E, C>
where
    S: KeyValueStorage,
    E: MapEngine,
    C: Clock,
{
    /// Loads the stored annotations and creates an annotator.
    ///
    /// This is the only place the storage is read. Fails if a stored list cannot
    /// be parsed.
    pub fn with_clock(
        config: MapInitConfig,
        storage: S,
        engine: E,
        clock: C,
    ) -> Result<Self, AnnotatorError> {
        let store = AnnotationStore::load(&storage)?;

        Ok(Self {
            config,
            storage,
            store,
            session: DrawSession::new(),
            view: MapViewBinding::new(engine),
            clock,
        })
    }

    /// Mounts the map. Returns false if the engine container is not ready yet;
    /// call again on the next render.
    pub fn mount(&mut self) -> bool {
        self.view.mount(&self.config, &self.store)
    }

    /// Handles a control panel button.
    pub fn press(&mut self, action: ControlAction) -> Result<(), AnnotatorError> {
        log::debug!("Control action: {action:?}");

        if action.closes_popup() {
            self.view.close_popup();
        }
        if action.discards_line() {
            self.session.discard_line(self.view.engine_mut());
        }

        match action {
            ControlAction::ToggleVisibility(kind) => {
                let visible = self.view.toggle_visibility(kind);
                log::debug!("{} visible: {visible}", kind.source_id());
            }
            ControlAction::Add(kind) => {
                self.session.begin(kind, self.view.engine_mut());
            }
            ControlAction::DeleteAll(kind) => {
                let change = self.store.clear(&self.storage, kind)?;
                self.view.sync(change, &self.store);
            }
        }

        self.view.rebind_draw_listener(!self.session.is_idle());
        Ok(())
    }

    /// Handles a pointer event emitted by the engine.
    pub fn handle_map_event(&mut self, event: &MapEvent) -> Result<(), AnnotatorError> {
        for target in self.view.dispatch(event) {
            match target {
                ListenerTarget::PointerCursor => self.view.set_cursor(Cursor::Pointer),
                ListenerTarget::DefaultCursor => self.view.set_cursor(Cursor::Default),
                ListenerTarget::GrabCursor => self.view.set_cursor(Cursor::Grab),
                ListenerTarget::Inspect => {
                    if let MapEvent::Click {
                        lnglat,
                        hit: Some(hit),
                    } = event
                    {
                        self.view.open_popup(hit, *lnglat);
                    }
                }
                ListenerTarget::Draw => {
                    if let MapEvent::Click { lnglat, .. } = event {
                        self.draw_click(*lnglat)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn draw_click(&mut self, at: LngLat) -> Result<(), AnnotatorError> {
        let locale = self.config.locale;
        let clock = &self.clock;
        let commit = self.session.click(at, self.view.engine_mut(), || {
            locale.format_date(clock.today())
        });
        self.view.rebind_draw_listener(!self.session.is_idle());

        let Some(commit) = commit else {
            return Ok(());
        };

        let stored = match &commit {
            Commit::Point(point) => {
                log::info!("Adding point at {:?}", point.coords);
                self.store.push_point(&self.storage, point.clone())
            }
            Commit::Line(line) => {
                log::info!("Adding line {:?}", line.coords);
                self.store.push_line(&self.storage, line.clone())
            }
        };

        match stored {
            Ok(change) => {
                self.view.sync(change, &self.store);
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to store annotation: {err}");
                self.session.resume(&commit, self.view.engine_mut());
                self.view.rebind_draw_listener(true);
                Err(err)
            }
        }
    }

    /// Initial map configuration.
    pub fn config(&self) -> &MapInitConfig {
        &self.config
    }

    /// Annotations.
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Storage the annotations are written to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Draw session.
    pub fn session(&self) -> &DrawSession {
        &self.session
    }

    /// Map view binding.
    pub fn view(&self) -> &MapViewBinding<E> {
        &self.view
    }

    /// Map engine.
    pub fn engine(&self) -> &E {
        self.view.engine()
    }

    /// Consumes the annotator and returns the map engine.
    pub fn into_engine(self) -> E {
        self.view.into_engine()
    }

    /// Layer visibility.
    pub fn visibility(&self) -> LayerVisibility {
        self.view.visibility()
    }

    /// Control panel groups.
    pub fn controls(&self) -> [ControlGroup; 2] {
        control_groups(self.view.visibility(), self.config.locale)
    }

    /// Status tooltip.
    pub fn tooltip(&self) -> Tooltip {
        Tooltip::new(self.session.state(), self.config.locale)
    }

    /// Number of annotations of the kind.
    pub fn count(&self, kind: AnnotationKind) -> usize {
        self.store.count(kind)
    }
}
