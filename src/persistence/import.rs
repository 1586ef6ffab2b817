use super::ImportError;
use crate::grid;
use crate::model::{DEFAULT_COLOR, Progress, Project, Segment, WorkType};
use crate::range::validate_range;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

/// Logical fields every imported row must provide.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "client",
    "site",
    "work_type",
    "owner",
    "progress",
    "start_date",
    "end_date",
];

const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

/// Generic row-oriented table produced by the parse step, before any
/// mapping or validation is applied.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[HashMap<String, String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Parse uploaded bytes in the given format. A UTF-8 byte order mark is
/// stripped first; our own CSV export emits one for spreadsheet
/// compatibility.
pub fn parse(bytes: &[u8], format: ImportFormat) -> Result<RawTable, ImportError> {
    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match format {
        ImportFormat::Csv => parse_csv(bytes),
        ImportFormat::Json => parse_json(bytes),
    }
}

pub fn parse_csv<R: Read>(reader: R) -> Result<RawTable, ImportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(RawTable { columns, rows })
}

/// Parse a JSON array of flat objects. Columns are the union of keys across
/// rows, in serde_json's alphabetical key order; non-string scalars are
/// stringified, nulls become empty.
pub fn parse_json<R: Read>(reader: R) -> Result<RawTable, ImportError> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_reader(reader)?;
    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    for record in records {
        let mut row = HashMap::new();
        for (key, value) in record {
            if !columns.contains(&key) {
                columns.push(key.clone());
            }
            let text = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            row.insert(key, text);
        }
        rows.push(row);
    }
    Ok(RawTable { columns, rows })
}

/// Assignment of logical fields to source column names. Optional fields
/// (note, color, label) fall back to a source column of the same name when
/// unmapped.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    map: HashMap<String, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each logical field reads a source column of the same name.
    pub fn identity() -> Self {
        let mut mapping = Self::new();
        for field in REQUIRED_FIELDS {
            mapping.set(field, field);
        }
        mapping
    }

    pub fn set(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.map.insert(field.into(), column.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.map.get(field).map(String::as_str)
    }

    fn source_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.get(field).unwrap_or(field)
    }
}

/// Freshly minted project/segment collections, ready for
/// [`crate::state::AppState::replace_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    pub projects: Vec<Project>,
    pub segments: Vec<Segment>,
}

fn parse_date_field(value: &str, field: &'static str) -> Result<NaiveDate, ImportError> {
    grid::parse_date(value).ok_or_else(|| ImportError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Turn parsed rows into projects and segments according to the mapping.
/// The whole row set is validated before anything is returned, so a failed
/// import leaves no partial result behind.
pub fn transform_import(
    table: &RawTable,
    mapping: &ColumnMapping,
) -> Result<ImportResult, ImportError> {
    let unmapped: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| mapping.get(field).is_none())
        .collect();
    if !unmapped.is_empty() {
        return Err(ImportError::MappingIncomplete(unmapped));
    }

    let absent: Vec<&str> = REQUIRED_FIELDS
        .into_iter()
        .map(|field| mapping.source_for(field))
        .filter(|source| !table.has_column(source))
        .collect();
    if !absent.is_empty() {
        return Err(ImportError::MissingColumn(absent.join(", ")));
    }

    let value_of = |row: &HashMap<String, String>, field: &'static str| -> String {
        row.get(mapping.source_for(field)).cloned().unwrap_or_default()
    };

    let mut projects = Vec::with_capacity(table.len());
    let mut segments = Vec::with_capacity(table.len());
    for row in table.rows() {
        let start_date = parse_date_field(&value_of(row, "start_date"), "start_date")?;
        let end_date = parse_date_field(&value_of(row, "end_date"), "end_date")?;
        let (start_date, end_date) = validate_range(start_date, end_date)?;

        let color = value_of(row, "color");
        let label = value_of(row, "label");
        let project_id = Uuid::new_v4().to_string();
        projects.push(Project {
            id: project_id.clone(),
            name: value_of(row, "name"),
            client: value_of(row, "client"),
            site: value_of(row, "site"),
            work_type: WorkType::from_label(&value_of(row, "work_type")),
            owner: value_of(row, "owner"),
            progress: Progress::from_label(&value_of(row, "progress")),
            note: value_of(row, "note"),
            color: if color.is_empty() {
                DEFAULT_COLOR.to_string()
            } else {
                color
            },
        });
        segments.push(Segment {
            segment_id: Uuid::new_v4().to_string(),
            project_id,
            label: if label.is_empty() {
                "工期".to_string()
            } else {
                label
            },
            start_date,
            end_date,
        });
    }
    log::info!("import transformed {} rows", projects.len());
    Ok(ImportResult { projects, segments })
}

#[derive(Debug, Deserialize)]
struct SeedRecord {
    name: String,
    client: String,
    site: String,
    work_type: String,
    owner: String,
    progress: String,
    start_date: String,
    end_date: String,
}

/// Load the bundled seed CSV into the initial collections. Project ids are
/// stable `PRJ-NNN` strings in file order; each row becomes one project
/// with one 基本工期 segment, and two demonstration segments are attached
/// to the first and fourth projects.
pub fn load_seed_data<R: Read>(reader: R) -> Result<ImportResult, ImportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut projects = Vec::new();
    let mut segments = Vec::new();
    for (idx, record) in csv_reader.deserialize::<SeedRecord>().enumerate() {
        let record = record?;
        let start_date = parse_date_field(&record.start_date, "start_date")?;
        let end_date = parse_date_field(&record.end_date, "end_date")?;
        let (start_date, end_date) = validate_range(start_date, end_date)?;

        let project_id = format!("PRJ-{:03}", idx + 1);
        projects.push(Project {
            id: project_id.clone(),
            name: record.name,
            client: record.client,
            site: record.site,
            work_type: WorkType::from_label(&record.work_type),
            owner: record.owner,
            progress: Progress::from_label(&record.progress),
            note: String::new(),
            color: DEFAULT_COLOR.to_string(),
        });
        segments.push(Segment {
            segment_id: Uuid::new_v4().to_string(),
            project_id,
            label: "基本工期".to_string(),
            start_date,
            end_date,
        });
    }

    // Demonstration segments matching the bundled dataset.
    if let Some(first) = projects.first() {
        segments.push(Segment {
            segment_id: Uuid::new_v4().to_string(),
            project_id: first.id.clone(),
            label: "内装工事".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
        });
    }
    if let Some(fourth) = projects.get(3) {
        segments.push(Segment {
            segment_id: Uuid::new_v4().to_string(),
            project_id: fourth.id.clone(),
            label: "設備搬入".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
        });
    }

    log::info!(
        "seed data loaded: {} projects, {} segments",
        projects.len(),
        segments.len()
    );
    Ok(ImportResult { projects, segments })
}

pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<ImportResult, ImportError> {
    let file = File::open(path)?;
    load_seed_data(file)
}
