use super::ExportError;
use crate::model::{Progress, Project, Segment, WorkType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One flat export row: a segment merged with the display fields of its
/// owning project. `NaiveDate` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub name: String,
    pub client: String,
    pub site: String,
    pub work_type: WorkType,
    pub owner: String,
    pub progress: Progress,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub label: String,
    pub note: String,
    pub color: String,
}

/// Left-join segments to their owning projects, optionally restricted to a
/// set of project ids. Segments whose project is unknown are dropped here,
/// the same read-time referential check the chart layout applies.
pub fn export_flat(
    projects: &[Project],
    segments: &[Segment],
    project_ids: Option<&HashSet<String>>,
) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for segment in segments {
        if let Some(filter) = project_ids {
            if !filter.contains(&segment.project_id) {
                continue;
            }
        }
        let Some(project) = projects.iter().find(|p| p.id == segment.project_id) else {
            log::warn!(
                "export: segment {} references unknown project {}",
                segment.segment_id,
                segment.project_id
            );
            continue;
        };
        rows.push(ExportRow {
            name: project.name.clone(),
            client: project.client.clone(),
            site: project.site.clone(),
            work_type: project.work_type,
            owner: project.owner.clone(),
            progress: project.progress,
            start_date: segment.start_date,
            end_date: segment.end_date,
            label: segment.label.clone(),
            note: project.note.clone(),
            color: project.color.clone(),
        });
    }
    rows
}

const EXPORT_HEADERS: [&str; 11] = [
    "name",
    "client",
    "site",
    "work_type",
    "owner",
    "progress",
    "start_date",
    "end_date",
    "label",
    "note",
    "color",
];

/// Serialize rows as UTF-8 CSV with a byte order mark, which spreadsheet
/// applications need to detect the encoding. The header row is written
/// explicitly so an export of zero rows still carries the column names.
pub fn to_csv_bytes(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut bytes = vec![0xef, 0xbb, 0xbf];
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut bytes);
        writer.write_record(EXPORT_HEADERS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    Ok(bytes)
}

/// Serialize rows as an indented JSON array. Non-ASCII characters stay
/// literal; serde_json does not escape them.
pub fn to_json_bytes(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(rows)?)
}
