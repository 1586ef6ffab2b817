use serde::{Deserialize, Serialize};

/// Vertical gridline density on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridMode {
    #[serde(rename = "週")]
    Week,
    #[serde(rename = "日")]
    Day,
    #[serde(rename = "なし")]
    Off,
}

impl GridMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridMode::Week => "週",
            GridMode::Day => "日",
            GridMode::Off => "なし",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "週" | "week" => Some(GridMode::Week),
            "日" | "day" => Some(GridMode::Day),
            "なし" | "none" => Some(GridMode::Off),
            _ => None,
        }
    }
}

/// Horizontal tick density on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zoom {
    #[serde(rename = "週")]
    Week,
    #[serde(rename = "月")]
    Month,
    #[serde(rename = "四半期")]
    Quarter,
}

impl Zoom {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zoom::Week => "週",
            Zoom::Month => "月",
            Zoom::Quarter => "四半期",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "週" | "week" => Some(Zoom::Week),
            "月" | "month" => Some(Zoom::Month),
            "四半期" | "quarter" => Some(Zoom::Quarter),
            _ => None,
        }
    }
}

/// Pure display configuration. No invariants; never part of history
/// snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub grid_mode: GridMode,
    pub show_today: bool,
    pub zoom: Zoom,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_mode: GridMode::Week,
            show_today: true,
            zoom: Zoom::Month,
        }
    }
}

/// Partial settings update: only fields carrying `Some` are applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsUpdate {
    pub grid_mode: Option<GridMode>,
    pub show_today: Option<bool>,
    pub zoom: Option<Zoom>,
}

impl Settings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(grid_mode) = update.grid_mode {
            self.grid_mode = grid_mode;
        }
        if let Some(show_today) = update.show_today {
            self.show_today = show_today;
        }
        if let Some(zoom) = update.zoom {
            self.zoom = zoom;
        }
    }
}
