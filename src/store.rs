use crate::model::{Progress, Project, Segment, WorkType};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Partial project update. Only fields carrying `Some` are written; there is
/// no way to address a field the model does not have, which is the typed
/// rendition of "unknown field names are ignored silently".
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub client: Option<String>,
    pub site: Option<String>,
    pub work_type: Option<WorkType>,
    pub owner: Option<String>,
    pub progress: Option<Progress>,
    pub note: Option<String>,
    pub color: Option<String>,
}

/// Partial segment update, scoped to the label and date fields.
#[derive(Debug, Clone, Default)]
pub struct SegmentUpdate {
    pub label: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// In-memory collections for one session. Vectors keep display order; the
/// dataset is tens to low hundreds of rows, so linear lookup is fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    projects: Vec<Project>,
    segments: Vec<Segment>,
    selected_projects: HashSet<String>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn selected_projects(&self) -> &HashSet<String> {
        &self.selected_projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn segment(&self, segment_id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.segment_id == segment_id)
    }

    pub fn segments_of(&self, project_id: &str) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.project_id == project_id)
            .collect()
    }

    /// Wholesale replacement of both collections, used by import.
    pub fn replace_all(&mut self, projects: Vec<Project>, segments: Vec<Segment>) {
        self.projects = projects;
        self.segments = segments;
    }

    pub(crate) fn restore(
        &mut self,
        projects: Vec<Project>,
        segments: Vec<Segment>,
        selected_projects: HashSet<String>,
    ) {
        self.projects = projects;
        self.segments = segments;
        self.selected_projects = selected_projects;
    }

    /// Apply a partial update to a project. An unknown id is a silent no-op;
    /// returns whether anything was touched.
    pub fn update_project(&mut self, id: &str, update: &ProjectUpdate) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            log::debug!("update_project: no project with id {id}");
            return false;
        };
        if let Some(name) = &update.name {
            project.name = name.clone();
        }
        if let Some(client) = &update.client {
            project.client = client.clone();
        }
        if let Some(site) = &update.site {
            project.site = site.clone();
        }
        if let Some(work_type) = update.work_type {
            project.work_type = work_type;
        }
        if let Some(owner) = &update.owner {
            project.owner = owner.clone();
        }
        if let Some(progress) = update.progress {
            project.progress = progress;
        }
        if let Some(note) = &update.note {
            project.note = note.clone();
        }
        if let Some(color) = &update.color {
            project.color = color.clone();
        }
        true
    }

    /// Apply a partial update to a segment. An unknown id is a silent no-op.
    /// Date consistency is the caller's concern (validated before commit in
    /// [`crate::state::AppState::update_segment`]).
    pub fn update_segment(&mut self, segment_id: &str, update: &SegmentUpdate) -> bool {
        let Some(segment) = self
            .segments
            .iter_mut()
            .find(|s| s.segment_id == segment_id)
        else {
            log::debug!("update_segment: no segment with id {segment_id}");
            return false;
        };
        if let Some(label) = &update.label {
            segment.label = label.clone();
        }
        if let Some(start_date) = update.start_date {
            segment.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            segment.end_date = end_date;
        }
        true
    }

    /// Replace the selection set. Purely a UI cache; ids are not checked
    /// against the project collection.
    pub fn set_selected_projects<I>(&mut self, project_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selected_projects = project_ids.into_iter().collect();
    }
}
