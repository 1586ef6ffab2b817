use crate::history::{History, Snapshot};
use crate::model::{Project, Segment};
use crate::persistence::{self, ImportError};
use crate::range::{InvalidRangeError, validate_range};
use crate::settings::{Settings, SettingsUpdate};
use crate::store::{DataStore, ProjectUpdate, SegmentUpdate};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// All session state, explicitly owned: the live collections, the history
/// stacks, and the display settings. One logical thread of control mutates
/// it at a time; every operation runs to completion synchronously.
#[derive(Debug, Default)]
pub struct AppState {
    store: DataStore,
    history: History,
    settings: Settings,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build session state from the seed CSV (columns name, client, site,
    /// work_type, owner, progress, start_date, end_date).
    pub fn from_seed<R: Read>(reader: R) -> Result<Self, ImportError> {
        let result = persistence::load_seed_data(reader)?;
        let mut state = Self::new();
        state.store.replace_all(result.projects, result.segments);
        Ok(state)
    }

    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_seed(file)
    }

    pub fn projects(&self) -> &[Project] {
        self.store.projects()
    }

    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }

    pub fn selected_projects(&self) -> &HashSet<String> {
        self.store.selected_projects()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Capture the current dataset onto the undo stack. Invalidates redo.
    pub fn push_history(&mut self) {
        self.history.push(Snapshot::capture(&self.store));
    }

    /// Restore the most recent undo snapshot, parking the current state on
    /// the redo stack. Returns false when there is nothing to undo; the
    /// presentation layer turns that into a user notice.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop_undo() else {
            log::info!("undo requested with empty history");
            return false;
        };
        self.history.push_redo(Snapshot::capture(&self.store));
        snapshot.restore(&mut self.store);
        true
    }

    /// Re-apply the most recent redo snapshot. The current state becomes a
    /// new undo step, but the snapshots still queued behind the target stay
    /// on the redo stack so a chain of redos replays every undone edit.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop_redo() else {
            log::info!("redo requested with empty future");
            return false;
        };
        self.history.push_keep_redo(Snapshot::capture(&self.store));
        snapshot.restore(&mut self.store);
        true
    }

    /// Replace both collections, recording the pre-mutation state when
    /// `push` is set (callers batching several edits into one undo step
    /// push once themselves and pass false).
    pub fn replace_all(&mut self, projects: Vec<Project>, segments: Vec<Segment>, push: bool) {
        if push {
            self.push_history();
        }
        log::info!(
            "replacing dataset: {} projects, {} segments",
            projects.len(),
            segments.len()
        );
        self.store.replace_all(projects, segments);
    }

    /// Apply a partial project update. Unknown ids are silent no-ops, but
    /// the pre-mutation snapshot is still recorded when `push` is set.
    pub fn update_project(&mut self, id: &str, update: &ProjectUpdate, push: bool) {
        if push {
            self.push_history();
        }
        self.store.update_project(id, update);
    }

    /// Apply a partial segment update, validating the prospective date range
    /// first. A rejected edit touches neither the store nor the history.
    pub fn update_segment(
        &mut self,
        segment_id: &str,
        update: &SegmentUpdate,
        push: bool,
    ) -> Result<(), InvalidRangeError> {
        if let Some(segment) = self.store.segment(segment_id) {
            let start = update.start_date.unwrap_or(segment.start_date);
            let end = update.end_date.unwrap_or(segment.end_date);
            validate_range(start, end)?;
        }
        if push {
            self.push_history();
        }
        self.store.update_segment(segment_id, update);
        Ok(())
    }

    /// Selection is a UI cache: no history interaction.
    pub fn set_selected_projects<I>(&mut self, project_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.store.set_selected_projects(project_ids);
    }

    /// Display settings are not part of the undoable dataset.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
    }
}
