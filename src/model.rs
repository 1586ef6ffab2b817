use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bar color applied when imported rows carry none.
pub const DEFAULT_COLOR: &str = "#f97316";

/// Construction work category. Serialized with the Japanese labels the
/// source data uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    #[serde(rename = "建築")]
    Building,
    #[serde(rename = "土木")]
    CivilEngineering,
    #[serde(rename = "その他")]
    Other,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Building => "建築",
            WorkType::CivilEngineering => "土木",
            WorkType::Other => "その他",
        }
    }

    /// Lenient parse: unrecognized labels fall back to [`WorkType::Other`],
    /// matching the permissive free-string handling of imported data.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "建築" | "building" => WorkType::Building,
            "土木" | "civil-engineering" | "civil" => WorkType::CivilEngineering,
            _ => WorkType::Other,
        }
    }
}

/// Project progress status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Progress {
    #[serde(rename = "予定")]
    Planned,
    #[serde(rename = "進行")]
    InProgress,
    #[serde(rename = "完了")]
    Done,
}

impl Progress {
    pub fn as_str(&self) -> &'static str {
        match self {
            Progress::Planned => "予定",
            Progress::InProgress => "進行",
            Progress::Done => "完了",
        }
    }

    /// Lenient parse: unrecognized labels are treated as planned.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "進行" | "in-progress" => Progress::InProgress,
            "完了" | "done" => Progress::Done,
            _ => Progress::Planned,
        }
    }
}

/// A construction order. Projects are created on import or seed load,
/// mutated in place by edits, and never deleted within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub site: String,
    pub work_type: WorkType,
    pub owner: String,
    pub progress: Progress,
    pub note: String,
    pub color: String,
}

/// A date-ranged bar owned by a project. `end_date >= start_date` is
/// enforced at every edit boundary. `project_id` is checked at read time
/// only: segments whose project disappeared are skipped, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub segment_id: String,
    pub project_id: String,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
