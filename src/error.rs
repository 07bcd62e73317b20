//! Errors raised by the schedule pipeline.
//!
//! Everything here is fatal: a malformed page or a stale track list aborts
//! the run before any page is written to Notion. Per-record write failures
//! are not errors at this level — the sync driver reports them and moves on.

/// Fatal pipeline error.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A schedule block did not contain the three expected text nodes
    /// (date, title, description). Skipping it would corrupt the
    /// track-boundary count, so the whole run stops.
    #[error("schedule block {index} is malformed: expected 3 text nodes, found {found}")]
    MalformedBlock { index: usize, found: usize },

    /// A raw date field did not parse as `DD.MM`.
    #[error("invalid raw date {raw:?}: expected DD.MM")]
    InvalidDate { raw: String },

    /// More day boundaries in the page than configured tracks.
    #[error("track list exhausted: more day boundaries than the {tracks} configured tracks")]
    TrackOverflow { tracks: usize },

    /// A lecture appeared before the first day-boundary marker, so no
    /// track can be assigned to it.
    #[error("schedule entry with date {raw:?} precedes the first day marker")]
    NoCurrentTrack { raw: String },
}
