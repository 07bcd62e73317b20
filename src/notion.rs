use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};

use crate::config::NotionConfig;
use crate::parser::Lecture;

const API_BASE: &str = "https://api.notion.com";
const NOTION_VERSION: &str = "2022-06-28";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Notion API client scoped to one destination database.
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    database_id: String,
    secret: String,
}

/// Raw outcome of a page-create call. 200 means the page exists; anything
/// else is a per-record failure with the body as diagnostics. Interpreting
/// the status is the sync driver's job.
#[derive(Debug)]
pub struct SinkResponse {
    pub status: u16,
    pub body: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: API_BASE.into(),
            database_id: config.database_id.clone(),
            secret: config.secret.clone(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create one database page for `lecture`. Transport errors bubble up;
    /// HTTP-level failures come back as a [`SinkResponse`].
    pub async fn create_page(&self, lecture: &Lecture) -> Result<SinkResponse> {
        let payload = json!({
            "parent": { "database_id": self.database_id },
            "properties": build_page_properties(lecture),
        });

        let response = self
            .client
            .post(format!("{}/v1/pages", self.base_url))
            .bearer_auth(&self.secret)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(SinkResponse { status, body })
    }
}

/// Map a lecture onto the database's property schema.
fn build_page_properties(lecture: &Lecture) -> Value {
    json!({
        "Title": { "title": [{ "text": { "content": lecture.title } }] },
        "Track": {
            "multi_select": lecture
                .tracks
                .iter()
                .map(|track| json!({ "name": track }))
                .collect::<Vec<_>>()
        },
        "Video": { "url": lecture.link },
        "Date": { "date": { "start": lecture.date } },
        "Lecturers": {
            "multi_select": lecture
                .speakers
                .iter()
                .map(|speaker| json!({ "name": speaker }))
                .collect::<Vec<_>>()
        },
        "Description": { "rich_text": [{ "text": { "content": lecture.description } }] },
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lecture() -> Lecture {
        Lecture {
            title: "Opening keynote".into(),
            description: "A look back and a look ahead.".into(),
            date: "2023-06-06".into(),
            link: Some("https://video.example/welcome".into()),
            speakers: vec!["Anna Laurent".into(), "Pavel Sorin".into()],
            tracks: vec!["backend (Go)".into(), "mobile (iOS)".into()],
        }
    }

    #[test]
    fn properties_follow_the_database_schema() {
        let props = build_page_properties(&lecture());

        assert_eq!(
            props["Title"]["title"][0]["text"]["content"],
            "Opening keynote"
        );
        assert_eq!(props["Track"]["multi_select"][1]["name"], "mobile (iOS)");
        assert_eq!(props["Video"]["url"], "https://video.example/welcome");
        assert_eq!(props["Date"]["date"]["start"], "2023-06-06");
        assert_eq!(props["Lecturers"]["multi_select"][0]["name"], "Anna Laurent");
        assert_eq!(
            props["Description"]["rich_text"][0]["text"]["content"],
            "A look back and a look ahead."
        );
    }

    #[test]
    fn missing_link_serializes_as_null_url() {
        let mut l = lecture();
        l.link = None;
        let props = build_page_properties(&l);
        assert!(props["Video"]["url"].is_null());
    }

    #[tokio::test]
    async fn create_page_posts_to_the_pages_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .and(header("Notion-Version", NOTION_VERSION))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "object": "page" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = NotionClient::new(&NotionConfig {
            database_id: "db-123".into(),
            secret: "sk-test".into(),
        })
        .unwrap()
        .with_base_url(server.uri());

        let response = client.create_page(&lecture()).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.contains("page"));
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = NotionClient::new(&NotionConfig {
            database_id: "db".into(),
            secret: "sk".into(),
        })
        .unwrap()
        .with_base_url(server.uri());

        let response = client.create_page(&lecture()).await.unwrap();
        assert_eq!(response.status, 429);
        assert_eq!(response.body, "rate limited");
    }
}
