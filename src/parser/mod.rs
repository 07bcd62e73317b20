pub mod extract;
pub mod merge;
pub mod tracks;

use crate::config::ScheduleConfig;
use crate::error::ScheduleError;

/// Final schedule record: one Notion page per instance.
#[derive(Debug, Clone)]
pub struct Lecture {
    pub title: String,
    pub description: String,
    /// ISO `YYYY-MM-DD`, year fixed to the event year.
    pub date: String,
    /// Video link with any query string stripped.
    pub link: Option<String>,
    pub speakers: Vec<String>,
    /// Track names in assignment order; longer than one entry only for
    /// lectures merged across day sections.
    pub tracks: Vec<String>,
}

/// Three-pass pipeline: html → raw blocks → tracked lectures → merged records.
pub fn process_schedule(
    html: &str,
    schedule: &ScheduleConfig,
) -> Result<Vec<Lecture>, ScheduleError> {
    let raw = extract::scrape_lectures(html)?;
    let assigned = tracks::assign_tracks(raw, schedule)?;
    Ok(merge::merge_lectures(assigned))
}

// ── Tests ──
