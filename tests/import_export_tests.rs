use chrono::NaiveDate;
use gantt_tool::{
    ColumnMapping, DEFAULT_COLOR, ImportError, ImportFormat, Progress, WorkType, export_flat,
    load_seed_data, load_seed_file, parse, parse_csv, parse_json, to_csv_bytes, to_json_bytes,
    transform_import,
};
use std::collections::HashSet;
use std::io::Write;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const SEED_CSV: &str = "\
name,client,site,work_type,owner,progress,start_date,end_date
柏崎様邸新築工事,柏崎様,長岡市,建築,佐藤,進行,2025-07-10,2025-10-31
国道8号線舗装補修,県土木事務所,柏崎市,土木,田中,予定,2025-09-01,2025-12-20
山本様邸外構改修,山本様,上越市,その他,佐藤,完了,2025-05-12,2025-06-30
北部物流倉庫増築,北越運輸,新潟市,建築,高橋,予定,2025-11-04,2026-03-31
";

#[test]
fn seed_load_builds_projects_and_demo_segments() {
    let result = load_seed_data(SEED_CSV.as_bytes()).unwrap();
    assert_eq!(result.projects.len(), 4);
    // One base segment per project plus two demonstration segments
    assert_eq!(result.segments.len(), 6);

    assert_eq!(result.projects[0].id, "PRJ-001");
    assert_eq!(result.projects[3].id, "PRJ-004");
    assert_eq!(result.projects[0].work_type, WorkType::Building);
    assert_eq!(result.projects[1].work_type, WorkType::CivilEngineering);
    assert_eq!(result.projects[0].progress, Progress::InProgress);
    assert_eq!(result.projects[0].color, DEFAULT_COLOR);
    assert_eq!(result.projects[0].note, "");

    assert_eq!(result.segments[0].label, "基本工期");
    assert_eq!(result.segments[0].start_date, d(2025, 7, 10));

    let interior = &result.segments[4];
    assert_eq!(interior.project_id, "PRJ-001");
    assert_eq!(interior.label, "内装工事");
    assert_eq!(interior.start_date, d(2025, 8, 20));
    assert_eq!(interior.end_date, d(2025, 9, 5));

    let delivery = &result.segments[5];
    assert_eq!(delivery.project_id, "PRJ-004");
    assert_eq!(delivery.label, "設備搬入");

    // Segment ids are freshly minted and unique
    let ids: HashSet<_> = result.segments.iter().map(|s| &s.segment_id).collect();
    assert_eq!(ids.len(), result.segments.len());
}

#[test]
fn bundled_seed_file_loads() {
    let result = load_seed_file("data/sample_projects.csv").unwrap();
    assert_eq!(result.projects.len(), 4);
    assert_eq!(result.segments.len(), 6);
}

#[test]
fn parse_csv_builds_a_row_table() {
    let table = parse_csv("a,b\n1,x\n2,y\n".as_bytes()).unwrap();
    assert_eq!(table.columns(), ["a", "b"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1]["b"], "y");
}

#[test]
fn parse_strips_byte_order_mark() {
    let mut bytes = vec![0xef, 0xbb, 0xbf];
    bytes.extend_from_slice(b"a,b\n1,2\n");
    let table = parse(&bytes, ImportFormat::Csv).unwrap();
    assert_eq!(table.columns(), ["a", "b"]);
}

#[test]
fn parse_json_stringifies_scalars() {
    let table = parse_json(
        r#"[{"name": "A", "count": 3, "flag": true, "memo": null}]"#.as_bytes(),
    )
    .unwrap();
    // serde_json maps iterate keys alphabetically
    assert_eq!(table.columns(), ["count", "flag", "memo", "name"]);
    assert_eq!(table.rows()[0]["name"], "A");
    assert_eq!(table.rows()[0]["count"], "3");
    assert_eq!(table.rows()[0]["flag"], "true");
    assert_eq!(table.rows()[0]["memo"], "");
}

#[test]
fn malformed_input_is_a_parse_error() {
    assert!(matches!(
        parse(b"{not json", ImportFormat::Json),
        Err(ImportError::Json(_))
    ));
    // Ragged CSV row
    assert!(matches!(
        parse_csv("a,b\n1\n".as_bytes()),
        Err(ImportError::Csv(_))
    ));
}

#[test]
fn incomplete_mapping_lists_the_unmapped_fields() {
    let table = parse_csv("name,start,end\nA,2025-01-01,2025-02-01\n".as_bytes()).unwrap();
    let mut mapping = ColumnMapping::new();
    mapping.set("name", "name");
    mapping.set("start_date", "start");
    mapping.set("end_date", "end");
    match transform_import(&table, &mapping) {
        Err(ImportError::MappingIncomplete(fields)) => {
            assert!(fields.contains(&"client"));
            assert!(fields.contains(&"progress"));
            assert!(!fields.contains(&"name"));
        }
        other => panic!("expected MappingIncomplete, got {other:?}"),
    }
}

#[test]
fn mapped_column_absent_from_input_is_rejected() {
    let table = parse_csv("name\nA\n".as_bytes()).unwrap();
    let mut mapping = ColumnMapping::identity();
    mapping.set("client", "customer_column");
    match transform_import(&table, &mapping) {
        Err(ImportError::MissingColumn(columns)) => {
            assert!(columns.contains("customer_column"));
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

fn full_csv(rows: &str) -> String {
    format!("name,client,site,work_type,owner,progress,start_date,end_date\n{rows}")
}

#[test]
fn reversed_dates_abort_the_import() {
    let table =
        parse_csv(full_csv("A,c,s,建築,o,予定,2025-03-01,2025-01-01\n").as_bytes()).unwrap();
    assert!(matches!(
        transform_import(&table, &ColumnMapping::identity()),
        Err(ImportError::InvalidRange(_))
    ));
}

#[test]
fn unparseable_dates_abort_the_import() {
    let table = parse_csv(full_csv("A,c,s,建築,o,予定,soon,2025-01-01\n").as_bytes()).unwrap();
    match transform_import(&table, &ColumnMapping::identity()) {
        Err(ImportError::InvalidDate { field, value }) => {
            assert_eq!(field, "start_date");
            assert_eq!(value, "soon");
        }
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn optional_fields_get_defaults() {
    let table =
        parse_csv(full_csv("A,c,s,建築,o,予定,2025-01-01,2025-02-01\n").as_bytes()).unwrap();
    let result = transform_import(&table, &ColumnMapping::identity()).unwrap();
    assert_eq!(result.projects[0].note, "");
    assert_eq!(result.projects[0].color, DEFAULT_COLOR);
    assert_eq!(result.segments[0].label, "工期");
    assert_eq!(result.segments[0].project_id, result.projects[0].id);
}

#[test]
fn optional_columns_are_picked_up_when_present() {
    let csv = "name,client,site,work_type,owner,progress,start_date,end_date,label,color\n\
               A,c,s,建築,o,予定,2025-01-01,2025-02-01,仮設工事,#22c55e\n";
    let table = parse_csv(csv.as_bytes()).unwrap();
    let result = transform_import(&table, &ColumnMapping::identity()).unwrap();
    assert_eq!(result.segments[0].label, "仮設工事");
    assert_eq!(result.projects[0].color, "#22c55e");
}

#[test]
fn csv_export_is_bom_prefixed_utf8() {
    let seed = load_seed_data(SEED_CSV.as_bytes()).unwrap();
    let rows = export_flat(&seed.projects, &seed.segments, None);
    let bytes = to_csv_bytes(&rows).unwrap();
    assert_eq!(&bytes[..3], &[0xef, 0xbb, 0xbf]);
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert!(text.starts_with("name,client,site,work_type,owner,progress,start_date,end_date"));
    assert!(text.contains("2025-07-10"));
}

#[test]
fn empty_export_still_carries_the_header() {
    let bytes = to_csv_bytes(&[]).unwrap();
    assert_eq!(&bytes[..3], &[0xef, 0xbb, 0xbf]);
    let table = parse(&bytes, ImportFormat::Csv).unwrap();
    assert_eq!(
        table.columns(),
        [
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
            "color"
        ]
    );
    assert!(table.is_empty());
}

#[test]
fn json_export_keeps_non_ascii_literal() {
    let seed = load_seed_data(SEED_CSV.as_bytes()).unwrap();
    let rows = export_flat(&seed.projects, &seed.segments, None);
    let text = String::from_utf8(to_json_bytes(&rows).unwrap()).unwrap();
    assert!(text.contains("柏崎様邸新築工事"));
    assert!(!text.contains("\\u"));
}

#[test]
fn export_filter_restricts_to_given_projects() {
    let seed = load_seed_data(SEED_CSV.as_bytes()).unwrap();
    let only_first: HashSet<String> = ["PRJ-001".to_string()].into();
    let rows = export_flat(&seed.projects, &seed.segments, Some(&only_first));
    // Base segment plus the 内装工事 demonstration segment
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.name == "柏崎様邸新築工事"));
}

#[test]
fn orphan_segments_are_dropped_at_export() {
    let mut seed = load_seed_data(SEED_CSV.as_bytes()).unwrap();
    seed.segments[0].project_id = "PRJ-404".to_string();
    let rows = export_flat(&seed.projects, &seed.segments, None);
    assert_eq!(rows.len(), 5);
}

#[test]
fn csv_round_trip_preserves_logical_rows() {
    let table =
        parse_csv(full_csv("現場A,顧客,柏崎,土木,担当,進行,2025-04-01,2025-06-30\n").as_bytes())
            .unwrap();
    let imported = transform_import(&table, &ColumnMapping::identity()).unwrap();

    let rows = export_flat(&imported.projects, &imported.segments, None);
    let bytes = to_csv_bytes(&rows).unwrap();

    let reparsed = parse(&bytes, ImportFormat::Csv).unwrap();
    let reimported = transform_import(&reparsed, &ColumnMapping::identity()).unwrap();

    // Ids are regenerated; the logical payload must survive
    assert_eq!(reimported.projects.len(), 1);
    let (a, b) = (&imported.projects[0], &reimported.projects[0]);
    assert_eq!(a.name, b.name);
    assert_eq!(a.client, b.client);
    assert_eq!(a.site, b.site);
    assert_eq!(a.work_type, b.work_type);
    assert_eq!(a.owner, b.owner);
    assert_eq!(a.progress, b.progress);
    let (s, t) = (&imported.segments[0], &reimported.segments[0]);
    assert_eq!(s.start_date, t.start_date);
    assert_eq!(s.end_date, t.end_date);
    assert_eq!(s.label, t.label);
    assert_ne!(a.id, b.id);
}

#[test]
fn json_round_trip_through_a_temp_file() {
    let seed = load_seed_data(SEED_CSV.as_bytes()).unwrap();
    let rows = export_flat(&seed.projects, &seed.segments, None);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&to_json_bytes(&rows).unwrap()).unwrap();

    let bytes = std::fs::read(file.path()).unwrap();
    let table = parse(&bytes, ImportFormat::Json).unwrap();
    let reimported = transform_import(&table, &ColumnMapping::identity()).unwrap();
    assert_eq!(reimported.projects.len(), rows.len());
    assert_eq!(reimported.projects[0].name, "柏崎様邸新築工事");
}
