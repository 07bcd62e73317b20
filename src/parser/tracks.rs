use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::extract::RawLecture;
use super::Lecture;
use crate::config::ScheduleConfig;
use crate::error::ScheduleError;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2})\.(\d{2})$").unwrap());

/// Assign each lecture to a track by walking the sequence in document order.
///
/// The cursor starts before the first track and advances by one every time
/// the day-boundary date reappears; the triggering lecture belongs to the
/// newly advanced track. Dates are not otherwise compared or ordered.
pub fn assign_tracks(
    raw: Vec<RawLecture>,
    schedule: &ScheduleConfig,
) -> Result<Vec<Lecture>, ScheduleError> {
    let mut current: Option<usize> = None;
    let mut lectures = Vec::with_capacity(raw.len());

    for lecture in raw {
        if lecture.raw_date == schedule.first_day {
            let next = current.map_or(0, |i| i + 1);
            if next >= schedule.tracks.len() {
                return Err(ScheduleError::TrackOverflow {
                    tracks: schedule.tracks.len(),
                });
            }
            current = Some(next);
        }
        let track = match current {
            Some(i) => schedule.tracks[i].clone(),
            None => {
                return Err(ScheduleError::NoCurrentTrack {
                    raw: lecture.raw_date,
                })
            }
        };

        let date = normalize_date(&lecture.raw_date, schedule.year)?;

        lectures.push(Lecture {
            title: lecture.title,
            description: lecture.description,
            date,
            link: lecture.link.map(strip_query),
            speakers: lecture.speakers,
            tracks: vec![track],
        });
    }

    Ok(lectures)
}

/// `DD.MM` plus the configured event year → `YYYY-MM-DD`.
fn normalize_date(raw: &str, year: i32) -> Result<String, ScheduleError> {
    let caps = DATE_RE.captures(raw).ok_or_else(|| invalid(raw))?;
    let day: u32 = caps[1].parse().map_err(|_| invalid(raw))?;
    let month: u32 = caps[2].parse().map_err(|_| invalid(raw))?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid(raw))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn invalid(raw: &str) -> ScheduleError {
    ScheduleError::InvalidDate {
        raw: raw.to_string(),
    }
}

/// Drop the query string from a video link. Links without one pass through
/// unchanged, so the strip is idempotent.
fn strip_query(link: String) -> String {
    match link.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => link,
    }
}

// ── Tests ──
