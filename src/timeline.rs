use crate::grid;
use crate::model::{Progress, Project, Segment};
use crate::range::{InvalidRangeError, clip_to_range, validate_range};
use crate::settings::{GridMode, Settings, Zoom};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// One bar ready for rendering: a segment clipped to the view window and
/// merged with its project's display fields. `lane` counts the bars already
/// emitted for the same project, which the renderer uses to keep rows with
/// several segments readable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBar {
    pub segment_id: String,
    pub project_id: String,
    pub project_name: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub progress: Progress,
    pub color: String,
    pub lane: usize,
    pub selected: bool,
}

/// Join segments to projects and clip them to the view window. Segments
/// with an unknown project or entirely outside the window are skipped.
/// Bars come back sorted by project name, then start date.
pub fn layout_bars(
    projects: &[Project],
    segments: &[Segment],
    view_start: NaiveDate,
    view_end: NaiveDate,
    selected_projects: &HashSet<String>,
) -> Result<Vec<TimelineBar>, InvalidRangeError> {
    let (view_start, view_end) = validate_range(view_start, view_end)?;
    let mut lanes: HashMap<&str, usize> = HashMap::new();
    let mut bars = Vec::new();
    for segment in segments {
        let Some(project) = projects.iter().find(|p| p.id == segment.project_id) else {
            continue;
        };
        let Some((start, end)) = clip_to_range(
            segment.start_date,
            segment.end_date,
            view_start,
            view_end,
        )?
        else {
            continue;
        };
        let lane = lanes.entry(project.id.as_str()).or_insert(0);
        bars.push(TimelineBar {
            segment_id: segment.segment_id.clone(),
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            label: segment.label.clone(),
            start,
            end,
            progress: project.progress,
            color: project.color.clone(),
            lane: *lane,
            selected: selected_projects.contains(&project.id),
        });
        *lane += 1;
    }
    bars.sort_by(|a, b| {
        a.project_name
            .cmp(&b.project_name)
            .then(a.start.cmp(&b.start))
    });
    Ok(bars)
}

/// Everything the renderer needs to draw the calendar scaffolding for one
/// view window under the current display settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub month_spans: Vec<(NaiveDate, NaiveDate)>,
    pub month_labels: Vec<(NaiveDate, String)>,
    pub ticks: Vec<NaiveDate>,
    pub week_lines: Vec<NaiveDate>,
    pub day_lines: Vec<NaiveDate>,
    pub today: Option<NaiveDate>,
}

pub fn grid_layout(
    view_start: NaiveDate,
    view_end: NaiveDate,
    settings: &Settings,
) -> Result<GridLayout, InvalidRangeError> {
    let (view_start, view_end) = validate_range(view_start, view_end)?;

    let month_spans = grid::month_spans(view_start, view_end);
    let mut ticks = grid::tick_positions(view_start, view_end);
    match settings.zoom {
        Zoom::Week => {
            ticks.extend(grid::week_lines(view_start, view_end));
            ticks.sort();
            ticks.dedup();
        }
        Zoom::Quarter => {
            let quarter_starts = month_spans
                .iter()
                .map(|(span_start, _)| *span_start)
                .filter(|d| matches!(chrono::Datelike::month(d), 1 | 4 | 7 | 10));
            ticks.extend(quarter_starts);
            ticks.sort();
            ticks.dedup();
        }
        Zoom::Month => {}
    }

    let week_lines = match settings.grid_mode {
        GridMode::Week | GridMode::Day => grid::week_lines(view_start, view_end),
        GridMode::Off => Vec::new(),
    };
    let day_lines = match settings.grid_mode {
        GridMode::Day => grid::day_lines(view_start, view_end),
        _ => Vec::new(),
    };

    let today = if settings.show_today {
        Some(grid::today_jst()).filter(|t| (view_start..=view_end).contains(t))
    } else {
        None
    };

    Ok(GridLayout {
        month_spans,
        month_labels: grid::month_labels(view_start, view_end),
        ticks,
        week_lines,
        day_lines,
        today,
    })
}

/// Tick label format for the current zoom: day-of-month at month zoom,
/// month/day otherwise.
pub fn tick_format(zoom: Zoom) -> &'static str {
    match zoom {
        Zoom::Month => "%d",
        Zoom::Week | Zoom::Quarter => "%m/%d",
    }
}
