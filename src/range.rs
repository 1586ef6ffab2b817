use chrono::NaiveDate;
use std::fmt;

/// The end of a date range precedes its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for InvalidRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "end date {} must be on or after start date {}",
            self.end, self.start
        )
    }
}

impl std::error::Error for InvalidRangeError {}

/// Check that `start <= end` and hand the pair back.
pub fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), InvalidRangeError> {
    if end < start {
        return Err(InvalidRangeError { start, end });
    }
    Ok((start, end))
}

/// Clip a segment range to the view window. Both ranges are closed intervals,
/// so a segment that only touches the window boundary still overlaps.
/// Returns `None` when the segment lies entirely outside the window.
pub fn clip_to_range(
    seg_start: NaiveDate,
    seg_end: NaiveDate,
    view_start: NaiveDate,
    view_end: NaiveDate,
) -> Result<Option<(NaiveDate, NaiveDate)>, InvalidRangeError> {
    let (seg_start, seg_end) = validate_range(seg_start, seg_end)?;
    if seg_end < view_start || seg_start > view_end {
        return Ok(None);
    }
    Ok(Some((seg_start.max(view_start), seg_end.min(view_end))))
}
