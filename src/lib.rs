pub mod filter;
pub mod grid;
pub mod history;
pub mod model;
pub mod persistence;
pub mod range;
pub mod settings;
pub mod state;
pub mod store;
pub mod timeline;

pub use filter::{ProjectFilter, filter_projects, owner_options, segments_for_projects};
pub use history::{History, MAX_HISTORY, Snapshot};
pub use model::{DEFAULT_COLOR, Progress, Project, Segment, WorkType};
pub use persistence::{
    ColumnMapping, ExportError, ExportRow, ImportError, ImportFormat, ImportResult, RawTable,
    export_flat, load_seed_data, load_seed_file, parse, parse_csv, parse_json, to_csv_bytes,
    to_json_bytes, transform_import,
};
pub use range::{InvalidRangeError, clip_to_range, validate_range};
pub use settings::{GridMode, Settings, SettingsUpdate, Zoom};
pub use state::AppState;
pub use store::{DataStore, ProjectUpdate, SegmentUpdate};
pub use timeline::{GridLayout, TimelineBar, grid_layout, layout_bars, tick_format};
