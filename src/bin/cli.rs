use chrono::NaiveDate;
use gantt_tool::{
    AppState, ColumnMapping, GridMode, ImportFormat, ProjectUpdate, SegmentUpdate, Settings,
    SettingsUpdate, Zoom, export_flat, grid_layout, layout_bars, parse, to_csv_bytes,
    to_json_bytes, transform_import,
};
use gantt_tool::{Progress, grid};
use std::fs;
use std::io::{self, Write};

fn parse_date_arg(s: &str) -> Option<NaiveDate> {
    grid::parse_date(s)
}

fn parse_format(s: &str) -> Option<ImportFormat> {
    match s.to_ascii_lowercase().as_str() {
        "csv" => Some(ImportFormat::Csv),
        "json" => Some(ImportFormat::Json),
        _ => None,
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               List projects\n  segments [project_id]              List segments (optionally for one project)\n  seed <csv_path>                    Load seed CSV, replacing all data\n  import <csv|json> <path>           Import a file (identity column mapping)\n  export <csv|json> <path> [sel]     Export all rows, or only selected projects\n  seg <id> <start> <end> [label...]  Update a segment's dates and label\n  name     <project_id> <text...>    Update project name\n  note     <project_id> <text...>    Update project note\n  color    <project_id> <hex>        Update project bar color\n  progress <project_id> <予定|進行|完了>\n  select <id,id,...>|none            Replace the selection set\n  settings [grid <週|日|なし>] [zoom <週|月|四半期>] [today <on|off>]\n  view <start> <end>                 Show grid layout and clipped bars\n  bdays <start> <end>                Count business days inclusive\n  undo | redo                        Walk the history stacks\n  quit | exit"
    );
}

fn print_projects(state: &AppState) {
    println!(
        "{:<10} {:<20} {:<12} {:<12} {:<6} {:<8} {:<6}",
        "id", "name", "client", "site", "type", "owner", "prog"
    );
    for p in state.projects() {
        let mark = if state.selected_projects().contains(&p.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{:<10} {:<20} {:<12} {:<12} {:<6} {:<8} {:<6}{mark}",
            p.id,
            p.name,
            p.client,
            p.site,
            p.work_type.as_str(),
            p.owner,
            p.progress.as_str()
        );
    }
    println!(
        "({} projects, undo depth {}, redo depth {})",
        state.projects().len(),
        state.undo_depth(),
        state.redo_depth()
    );
}

fn print_segments(state: &AppState, project_id: Option<&str>) {
    for s in state.segments() {
        if let Some(pid) = project_id {
            if s.project_id != pid {
                continue;
            }
        }
        println!(
            "{:<38} {:<10} {} .. {}  {}",
            s.segment_id, s.project_id, s.start_date, s.end_date, s.label
        );
    }
}

fn print_settings(settings: &Settings) {
    println!(
        "grid={} zoom={} today={}",
        settings.grid_mode.as_str(),
        settings.zoom.as_str(),
        if settings.show_today { "on" } else { "off" }
    );
}

fn run_export(state: &AppState, format: ImportFormat, path: &str, selected_only: bool) {
    let filter = if selected_only {
        Some(state.selected_projects().clone())
    } else {
        None
    };
    let rows = export_flat(state.projects(), state.segments(), filter.as_ref());
    let bytes = match format {
        ImportFormat::Csv => to_csv_bytes(&rows),
        ImportFormat::Json => to_json_bytes(&rows),
    };
    match bytes.and_then(|b| fs::write(path, b).map_err(Into::into)) {
        Ok(()) => println!("exported {} rows to {path}", rows.len()),
        Err(err) => println!("export failed: {err}"),
    }
}

fn run_import(state: &mut AppState, format: ImportFormat, path: &str) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            println!("read failed: {err}");
            return;
        }
    };
    let result = parse(&bytes, format)
        .and_then(|table| transform_import(&table, &ColumnMapping::identity()));
    match result {
        Ok(imported) => {
            let count = imported.projects.len();
            state.replace_all(imported.projects, imported.segments, true);
            println!("imported {count} projects");
        }
        Err(err) => println!("import failed: {err}"),
    }
}

fn run_view(state: &AppState, start: NaiveDate, end: NaiveDate) {
    let layout = match grid_layout(start, end, state.settings()) {
        Ok(layout) => layout,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    for (pos, text) in &layout.month_labels {
        println!("{pos}  {text}");
    }
    println!(
        "ticks={} week_lines={} day_lines={} today={:?}",
        layout.ticks.len(),
        layout.week_lines.len(),
        layout.day_lines.len(),
        layout.today
    );
    match layout_bars(
        state.projects(),
        state.segments(),
        start,
        end,
        state.selected_projects(),
    ) {
        Ok(bars) => {
            for bar in bars {
                println!(
                    "{:<20} {} .. {}  {} (lane {})",
                    bar.project_name, bar.start, bar.end, bar.label, bar.lane
                );
            }
        }
        Err(err) => println!("{err}"),
    }
}

fn apply_settings_args(state: &mut AppState, args: &[&str]) {
    let mut update = SettingsUpdate::default();
    let mut iter = args.iter();
    while let Some(key) = iter.next() {
        let Some(value) = iter.next() else {
            println!("settings: missing value for {key}");
            return;
        };
        match *key {
            "grid" => match GridMode::from_label(value) {
                Some(mode) => update.grid_mode = Some(mode),
                None => println!("unknown grid mode: {value}"),
            },
            "zoom" => match Zoom::from_label(value) {
                Some(zoom) => update.zoom = Some(zoom),
                None => println!("unknown zoom: {value}"),
            },
            "today" => update.show_today = Some(matches!(*value, "on" | "true")),
            other => println!("unknown setting: {other}"),
        }
    }
    state.update_settings(update);
    print_settings(state.settings());
}

fn main() {
    env_logger::init();
    let mut state = AppState::new();
    println!("gantt-tool CLI. Type 'help' for commands, 'seed <path>' to load data.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            continue;
        };
        match command {
            "help" => print_help(),
            "show" => print_projects(&state),
            "segments" => print_segments(&state, args.first().copied()),
            "seed" => match args {
                [path] => match AppState::from_seed_file(path) {
                    Ok(loaded) => {
                        state = loaded;
                        println!("seeded {} projects", state.projects().len());
                    }
                    Err(err) => println!("seed failed: {err}"),
                },
                _ => println!("usage: seed <csv_path>"),
            },
            "import" => match args {
                [fmt, path] => match parse_format(fmt) {
                    Some(format) => run_import(&mut state, format, path),
                    None => println!("unknown format: {fmt}"),
                },
                _ => println!("usage: import <csv|json> <path>"),
            },
            "export" => match args {
                [fmt, path, rest @ ..] => match parse_format(fmt) {
                    Some(format) => {
                        run_export(&state, format, path, rest.first() == Some(&"sel"))
                    }
                    None => println!("unknown format: {fmt}"),
                },
                _ => println!("usage: export <csv|json> <path> [sel]"),
            },
            "seg" => match args {
                [id, start, end, label @ ..] => {
                    let (Some(start), Some(end)) = (parse_date_arg(start), parse_date_arg(end))
                    else {
                        println!("dates must be YYYY-MM-DD");
                        continue;
                    };
                    let update = SegmentUpdate {
                        label: (!label.is_empty()).then(|| label.join(" ")),
                        start_date: Some(start),
                        end_date: Some(end),
                    };
                    match state.update_segment(id, &update, true) {
                        Ok(()) => println!("updated {id}"),
                        Err(err) => println!("{err}"),
                    }
                }
                _ => println!("usage: seg <id> <start> <end> [label...]"),
            },
            "name" | "note" | "color" | "progress" => match args {
                [id, rest @ ..] if !rest.is_empty() => {
                    let text = rest.join(" ");
                    let mut update = ProjectUpdate::default();
                    match command {
                        "name" => update.name = Some(text),
                        "note" => update.note = Some(text),
                        "color" => update.color = Some(text),
                        _ => update.progress = Some(Progress::from_label(&text)),
                    }
                    state.update_project(id, &update, true);
                    println!("updated {id}");
                }
                _ => println!("usage: {command} <project_id> <value...>"),
            },
            "select" => match args {
                ["none"] => {
                    state.set_selected_projects(Vec::new());
                    println!("selection cleared");
                }
                [ids] => {
                    state.set_selected_projects(ids.split(',').map(str::to_string));
                    println!("selected {} projects", state.selected_projects().len());
                }
                _ => println!("usage: select <id,id,...>|none"),
            },
            "settings" => {
                if args.is_empty() {
                    print_settings(state.settings());
                } else {
                    apply_settings_args(&mut state, args);
                }
            }
            "view" => match args {
                [start, end] => {
                    match (parse_date_arg(start), parse_date_arg(end)) {
                        (Some(start), Some(end)) => run_view(&state, start, end),
                        _ => println!("dates must be YYYY-MM-DD"),
                    }
                }
                _ => println!("usage: view <start> <end>"),
            },
            "bdays" => match args {
                [start, end] => match (parse_date_arg(start), parse_date_arg(end)) {
                    (Some(start), Some(end)) => match grid::business_day_count(start, end) {
                        Ok(count) => println!("{count}"),
                        Err(err) => println!("{err}"),
                    },
                    _ => println!("dates must be YYYY-MM-DD"),
                },
                _ => println!("usage: bdays <start> <end>"),
            },
            "undo" => {
                if !state.undo() {
                    println!("元に戻す履歴がありません");
                }
            }
            "redo" => {
                if !state.redo() {
                    println!("やり直しできる履歴がありません");
                }
            }
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try 'help')"),
        }
    }
}
