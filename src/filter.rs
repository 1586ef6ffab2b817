use crate::model::{Progress, Project, Segment, WorkType};
use std::collections::HashSet;

/// Sidebar filter state. Empty lists mean "no restriction"; the search text
/// matches case-insensitively against name, client, site, and owner.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub search: String,
    pub work_types: Vec<WorkType>,
    pub progress: Vec<Progress>,
    pub owners: Vec<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        let search = self.search.trim();
        if !search.is_empty() {
            let needle = search.to_lowercase();
            let hit = [
                &project.name,
                &project.client,
                &project.site,
                &project.owner,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if !self.work_types.is_empty() && !self.work_types.contains(&project.work_type) {
            return false;
        }
        if !self.progress.is_empty() && !self.progress.contains(&project.progress) {
            return false;
        }
        if !self.owners.is_empty() && !self.owners.contains(&project.owner) {
            return false;
        }
        true
    }
}

pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// Segments belonging to any of the given projects, in store order.
pub fn segments_for_projects<'a>(
    segments: &'a [Segment],
    project_ids: &HashSet<&str>,
) -> Vec<&'a Segment> {
    segments
        .iter()
        .filter(|s| project_ids.contains(s.project_id.as_str()))
        .collect()
}

/// Distinct owner names in first-appearance order, for filter widgets.
pub fn owner_options(projects: &[Project]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut owners = Vec::new();
    for project in projects {
        if seen.insert(project.owner.as_str()) {
            owners.push(project.owner.clone());
        }
    }
    owners
}
