use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use unicode_normalization::UnicodeNormalization;

use crate::error::ScheduleError;

static BLOCK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.lc-events-program__container").unwrap());
static TEXT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.lc-styled-text__text").unwrap());
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static SPEAKER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.lc-events-speaker__name").unwrap());

/// One schedule block as it appears on the page, before track assignment.
#[derive(Debug, Clone)]
pub struct RawLecture {
    pub title: String,
    pub description: String,
    /// Short-form date, `DD.MM`.
    pub raw_date: String,
    pub link: Option<String>,
    pub speakers: Vec<String>,
}

/// Extract schedule blocks in document order.
///
/// Order is load-bearing: track assignment counts day-boundary dates while
/// walking this sequence, which is also why a malformed block aborts the
/// run instead of being skipped.
pub fn scrape_lectures(html: &str) -> Result<Vec<RawLecture>, ScheduleError> {
    let doc = Html::parse_document(html);
    let mut lectures = Vec::new();

    for (index, block) in doc.select(&BLOCK_SEL).enumerate() {
        let texts: Vec<String> = block.select(&TEXT_SEL).map(element_text).collect();
        if texts.len() < 3 {
            return Err(ScheduleError::MalformedBlock {
                index,
                found: texts.len(),
            });
        }

        // Text node positions are fixed: 0 = date, 1 = title, 2 = description.
        // The date cell carries a time suffix; only the first 5 chars matter.
        let raw_date = texts[0].chars().take(5).collect::<String>().trim().to_string();
        let title = nfkd(&texts[1]);
        let description = nfkd(&texts[2]).trim().replace('\n', " ");

        let link = block
            .select(&ANCHOR_SEL)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(String::from);

        let speakers = block.select(&SPEAKER_SEL).map(element_text).collect();

        lectures.push(RawLecture {
            title,
            description,
            raw_date,
            link,
            speakers,
        });
    }

    Ok(lectures)
}

fn element_text(el: ElementRef) -> String {
    el.text().collect()
}

fn nfkd(s: &str) -> String {
    s.nfkd().collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<RawLecture> {
        let html = std::fs::read_to_string("tests/fixtures/schedule.html").unwrap();
        scrape_lectures(&html).unwrap()
    }

    #[test]
    fn extracts_blocks_in_document_order() {
        let raw = fixture();
        assert_eq!(raw.len(), 5);
        let dates: Vec<&str> = raw.iter().map(|l| l.raw_date.as_str()).collect();
        assert_eq!(dates, vec!["06.06", "07.06", "08.06", "06.06", "09.06"]);
    }

    #[test]
    fn date_is_first_five_chars_trimmed() {
        // Fixture dates carry a " · HH:MM" suffix that must be sliced off.
        let raw = fixture();
        assert_eq!(raw[0].raw_date, "06.06");
        assert_eq!(raw[0].raw_date.len(), 5);
    }

    #[test]
    fn missing_anchor_means_no_link() {
        let raw = fixture();
        assert!(raw[1].link.is_none());
        assert_eq!(
            raw[0].link.as_deref(),
            Some("https://video.example/welcome?utm_source=school")
        );
    }

    #[test]
    fn speakers_collected_in_order() {
        let raw = fixture();
        assert_eq!(raw[1].speakers, vec!["Pavel Sorin", "Maria Keller"]);
        assert!(raw[4].speakers.is_empty());
    }

    #[test]
    fn description_is_single_line() {
        let raw = fixture();
        assert!(!raw[1].description.contains('\n'));
        assert!(raw[1].description.starts_with("Schema-first"));
    }

    #[test]
    fn text_is_nfkd_normalized() {
        let raw = fixture();
        // The fixture title contains a precomposed é (U+00E9); after NFKD it
        // must be the decomposed pair e + U+0301.
        assert!(raw[4].title.contains("Andre\u{0301}"));
        assert!(!raw[4].title.contains('\u{e9}'));
    }

    #[test]
    fn block_without_three_text_nodes_is_fatal() {
        let html = r#"
            <div class="lc-events-program__container">
              <div class="lc-styled-text__text">06.06</div>
              <div class="lc-styled-text__text">Title only</div>
            </div>
        "#;
        let err = scrape_lectures(html).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MalformedBlock { index: 0, found: 2 }
        ));
    }

    #[test]
    fn empty_page_yields_no_lectures() {
        let raw = scrape_lectures("<html><body></body></html>").unwrap();
        assert!(raw.is_empty());
    }
}
