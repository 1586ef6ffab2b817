use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc, Weekday};

/// Days inside a month that carry an axis tick, in addition to the month end.
const TICK_DAYS: [u32; 4] = [6, 12, 18, 24];

/// First calendar day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    next_month_start(month_start(date)) - Duration::days(1)
}

fn next_month_start(first: NaiveDate) -> NaiveDate {
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
    }
}

/// Iterator over the first day of every month in a window.
///
/// Pure function of its endpoints: calling [`iter_months`] again with the
/// same arguments restarts the sequence from the beginning.
#[derive(Debug, Clone)]
pub struct Months {
    current: NaiveDate,
    last: NaiveDate,
}

impl Iterator for Months {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.current > self.last {
            return None;
        }
        let month = self.current;
        self.current = next_month_start(month);
        Some(month)
    }
}

/// Yield the first day of each month from `month_start(start)` through
/// `month_start(end)` inclusive, ascending.
pub fn iter_months(start: NaiveDate, end: NaiveDate) -> Months {
    Months {
        current: month_start(start),
        last: month_start(end),
    }
}

/// Overlap of each month with the `[start, end]` window. The first and last
/// spans are truncated at the window boundary.
pub fn month_spans(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    iter_months(start, end)
        .map(|first| {
            let last = month_end(first);
            (first.max(start), last.min(end))
        })
        .collect()
}

/// One `(position, text)` label per month touching the window, positioned at
/// the temporal midpoint of the month.
pub fn month_labels(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, String)> {
    iter_months(start, end)
        .map(|first| {
            let last = month_end(first);
            let midpoint = first + Duration::days((last - first).num_days() / 2);
            let text = format!("{}年{}月", first.year(), first.month());
            (midpoint, text)
        })
        .collect()
}

/// Axis tick positions: days 6/12/18/24 and the month end for every month in
/// range, clipped to the window, consecutive duplicates collapsed.
pub fn tick_positions(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut ticks: Vec<NaiveDate> = Vec::new();
    for first in iter_months(start, end) {
        let last = month_end(first);
        for day in TICK_DAYS.into_iter().chain([last.day()]) {
            if day > last.day() {
                continue;
            }
            let tick = NaiveDate::from_ymd_opt(first.year(), first.month(), day).unwrap();
            if tick < start || tick > end {
                continue;
            }
            if ticks.last() == Some(&tick) {
                continue;
            }
            ticks.push(tick);
        }
    }
    ticks
}

/// Every Monday in `[start, end]`, ascending.
pub fn week_lines(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let offset = (7 - start.weekday().num_days_from_monday() as i64) % 7;
    let mut current = start + Duration::days(offset);
    let mut mondays = Vec::new();
    while current <= end {
        mondays.push(current);
        current += Duration::days(7);
    }
    mondays
}

/// Every day boundary strictly after `start` through `end` inclusive.
pub fn day_lines(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start + Duration::days(1);
    while current <= end {
        days.push(current);
        current += Duration::days(1);
    }
    days
}

/// Count weekdays (Mon-Fri) between `start` and `end` inclusive.
pub fn business_day_count(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64, crate::range::InvalidRangeError> {
    let (start, end) = crate::range::validate_range(start, end)?;
    let mut count = 0;
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        current += Duration::days(1);
    }
    Ok(count)
}

/// Today's date in the deployment locale (UTC+9).
pub fn today_jst() -> NaiveDate {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    Utc::now().with_timezone(&jst).date_naive()
}

/// Parse a date-only value leniently. Datetime inputs have the time-of-day
/// discarded; `None` means the input is not a recognizable date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}
