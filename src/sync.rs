use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::notion::NotionClient;
use crate::parser::Lecture;

/// Push stats returned after completion.
pub struct SyncStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Push lectures to the database one at a time, in order.
///
/// Writes are independent: a failed one is reported and skipped, the rest
/// of the run continues. No retry, no rollback of earlier successes.
pub async fn push_lectures(client: &NotionClient, lectures: &[Lecture]) -> Result<SyncStats> {
    let total = lectures.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut ok = 0usize;
    let mut errors = 0usize;

    for (i, lecture) in lectures.iter().enumerate() {
        match client.create_page(lecture).await {
            Ok(resp) if resp.status == 200 => {
                ok += 1;
                info!("Created page for {:?} [{}/{}]", lecture.title, i + 1, total);
            }
            Ok(resp) => {
                errors += 1;
                warn!(
                    status = resp.status,
                    body = %resp.body,
                    "Failed to create page for {:?}",
                    lecture.title
                );
            }
            Err(e) => {
                errors += 1;
                warn!("Request failed for {:?}: {}", lecture.title, e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Pushed {} lectures ({} ok, {} errors)", total, ok, errors);

    Ok(SyncStats { total, ok, errors })
}

// ── Tests ──
