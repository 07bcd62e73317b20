use std::collections::HashMap;

use tracing::warn;

use super::Lecture;

/// Collapse lectures that share a video link into one record whose track
/// list is the union of the group's tracks, in encounter order.
///
/// The first-encountered lecture keeps all scalar fields. Lectures without
/// a link are never grouped, not even with each other. Output order is not
/// contractual; this pass happens to preserve first-encounter order.
pub fn merge_lectures(lectures: Vec<Lecture>) -> Vec<Lecture> {
    let mut merged: Vec<Lecture> = Vec::with_capacity(lectures.len());
    let mut by_link: HashMap<String, usize> = HashMap::new();

    for lecture in lectures {
        let Some(link) = lecture.link.clone() else {
            merged.push(lecture);
            continue;
        };

        match by_link.get(&link) {
            Some(&i) => {
                let kept = &mut merged[i];
                if kept.title != lecture.title
                    || kept.description != lecture.description
                    || kept.date != lecture.date
                    || kept.speakers != lecture.speakers
                {
                    // Grouped records are assumed identical apart from the
                    // track; a mismatch means the first one silently wins.
                    warn!(
                        link = %link,
                        "duplicate lectures disagree on scalar fields, keeping the first"
                    );
                }
                kept.tracks.extend(lecture.tracks);
            }
            None => {
                by_link.insert(link, merged.len());
                merged.push(lecture);
            }
        }
    }

    merged
}

// ── Tests ──
