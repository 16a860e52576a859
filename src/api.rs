use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ureq::Agent;
use url::Url;

use crate::config::LectioConfig;
use crate::daily::DateToken;
use crate::errors::{LectioError, Result};
use crate::passage::{Passage, VerseElement};
use crate::types::{AnnotationTarget, Comment, Highlight, ReactionAck, ReactionAction, Reply};

/// Client for the reading-plan annotation server and the scripture
/// text API.
///
/// Carries no resolver knowledge: reference strings are passed through
/// verbatim, exactly as rendered by the core.
pub struct ApiClient {
    agent: Agent,
    server_url: String,
    scripture_api: String,
}

impl ApiClient {
    pub fn new(config: &LectioConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            server_url: config.server_url.trim_end_matches('/').to_string(),
            scripture_api: config.scripture_api.trim_end_matches('/').to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Scripture text
    // ------------------------------------------------------------------

    /// Fetches the text of a passage reference and builds a passage
    /// snapshot from the returned verses.
    ///
    /// The response carries one entry per verse; the verse's own pretty
    /// reference becomes the element's embedded reference string.
    pub fn fetch_passage(&self, reference: &str, translation: &str) -> Result<Passage> {
        let api_ref = normalize_for_api(reference);
        if api_ref.is_empty() {
            return Err(LectioError::Api {
                message: "empty passage reference".to_string(),
            });
        }

        let mut url = Url::parse(&self.scripture_api).map_err(|e| LectioError::Api {
            message: format!("invalid scripture api url '{}': {}", self.scripture_api, e),
        })?;
        url.path_segments_mut()
            .map_err(|_| LectioError::Api {
                message: format!("scripture api url '{}' cannot be a base", self.scripture_api),
            })?
            .push(&api_ref)
            .push(translation);

        debug!(%url, "fetching passage");
        let mut response = self.agent.get(url.as_str()).call()?;
        let body: QuoteResponse = response.body_mut().read_json()?;

        let verses = body
            .answer
            .verses
            .into_iter()
            .map(|verse| VerseElement {
                reference: verse.place.reference,
                text: verse.text,
            })
            .collect();

        Ok(Passage::new(verses))
    }

    // ------------------------------------------------------------------
    // Highlights
    // ------------------------------------------------------------------

    /// Submits a highlight and returns it as the server saved it,
    /// assembled from the echoed id and the submitted fields.
    pub fn add_highlight(
        &self,
        date: &DateToken,
        text: &str,
        verse_ref: Option<&str>,
        color: &str,
    ) -> Result<Highlight> {
        let url = self.url("/api/highlight");
        debug!(%url, ?verse_ref, "posting highlight");
        let mut response = self.agent.post(&url).send_json(HighlightPayload {
            date: date.to_string(),
            text,
            verse_ref,
            color,
        })?;
        let body: SaveResponse = response.body_mut().read_json()?;
        let (id, username) = saved(body, "highlight")?;
        Ok(Highlight {
            id,
            username,
            verse_ref: verse_ref.map(str::to_string),
            text: text.to_string(),
            color: color.to_string(),
            own: true,
            is_private: false,
        })
    }

    pub fn delete_highlight(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("/api/highlight/{}", id));
        debug!(%url, "deleting highlight");
        let mut response = self.agent.delete(&url).call()?;
        acked(response.body_mut().read_json()?, "delete the highlight")
    }

    // ------------------------------------------------------------------
    // Comments and replies
    // ------------------------------------------------------------------

    pub fn add_comment(
        &self,
        date: &DateToken,
        content: &str,
        verse_ref: Option<&str>,
    ) -> Result<Comment> {
        let url = self.url("/api/comment");
        debug!(%url, ?verse_ref, "posting comment");
        let mut response = self.agent.post(&url).send_json(CommentPayload {
            date: date.to_string(),
            content,
            verse_ref,
            kind: "comment",
        })?;
        let body: SaveResponse = response.body_mut().read_json()?;
        let (id, username) = saved(body, "comment")?;
        Ok(Comment {
            id,
            username,
            verse_ref: verse_ref.map(str::to_string),
            content: content.to_string(),
            replies: Vec::new(),
            is_private: false,
        })
    }

    pub fn update_comment(&self, id: u64, content: &str) -> Result<()> {
        let url = self.url(&format!("/api/comment/{}", id));
        debug!(%url, "updating comment");
        let mut response = self
            .agent
            .put(&url)
            .send_json(ContentPayload { content })?;
        acked(response.body_mut().read_json()?, "update the comment")
    }

    pub fn delete_comment(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("/api/comment/{}", id));
        debug!(%url, "deleting comment");
        let mut response = self.agent.delete(&url).call()?;
        acked(response.body_mut().read_json()?, "delete the comment")
    }

    pub fn add_reply(&self, comment_id: u64, content: &str) -> Result<Reply> {
        let url = self.url(&format!("/api/comment/{}/reply", comment_id));
        debug!(%url, "posting reply");
        let mut response = self
            .agent
            .post(&url)
            .send_json(ContentPayload { content })?;
        let body: ReplyResponse = response.body_mut().read_json()?;
        if !body.success {
            return Err(rejected(body.error, "save the reply"));
        }
        match (body.id, body.user_name) {
            (Some(id), Some(username)) => Ok(Reply {
                id,
                username,
                content: body.content.unwrap_or_else(|| content.to_string()),
            }),
            _ => Err(LectioError::Api {
                message: "server did not echo the saved reply".to_string(),
            }),
        }
    }

    pub fn delete_reply(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("/api/reply/{}", id));
        debug!(%url, "deleting reply");
        let mut response = self.agent.delete(&url).call()?;
        acked(response.body_mut().read_json()?, "delete the reply")
    }

    // ------------------------------------------------------------------
    // Reactions, privacy, read state
    // ------------------------------------------------------------------

    pub fn toggle_reaction(&self, target: AnnotationTarget, id: u64) -> Result<ReactionAck> {
        let url = self.url("/api/reaction");
        debug!(%url, target = target.as_str(), id, "toggling reaction");
        let mut response = self.agent.post(&url).send_json(ReactionPayload {
            target_type: target.as_str(),
            target_id: id,
        })?;
        let body: ReactionResponse = response.body_mut().read_json()?;
        if !body.success {
            return Err(rejected(body.error, "save the reaction"));
        }
        match body.action {
            Some(action) => Ok(ReactionAck {
                action,
                count: body.count.unwrap_or(0),
            }),
            None => Err(LectioError::Api {
                message: "server did not report the reaction outcome".to_string(),
            }),
        }
    }

    pub fn set_privacy(&self, target: AnnotationTarget, id: u64, is_private: bool) -> Result<()> {
        let url = self.url(&format!("/api/{}/{}/privacy", target.as_str(), id));
        debug!(%url, is_private, "setting privacy");
        let mut response = self
            .agent
            .put(&url)
            .send_json(PrivacyPayload { is_private })?;
        acked(response.body_mut().read_json()?, "update the privacy setting")
    }

    pub fn mark_read(&self, date: &DateToken, is_read: bool) -> Result<()> {
        let url = self.url("/api/mark-read");
        debug!(%url, is_read, "marking read state");
        let mut response = self.agent.post(&url).send_json(MarkReadPayload {
            date: date.to_string(),
            is_read,
        })?;
        acked(response.body_mut().read_json()?, "update the read state")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }
}

/// Normalizes a human-readable reference for the scripture API, which
/// expects compact forms like `"1Moz1-3"`: all whitespace is stripped.
pub fn normalize_for_api(reference: &str) -> String {
    reference.split_whitespace().collect()
}

fn saved(body: SaveResponse, what: &str) -> Result<(u64, String)> {
    if !body.success {
        return Err(rejected(body.error, &format!("save the {}", what)));
    }
    match (body.id, body.username) {
        (Some(id), Some(username)) => Ok((id, username)),
        _ => Err(LectioError::Api {
            message: format!("server did not echo the saved {}", what),
        }),
    }
}

fn acked(body: Ack, action: &str) -> Result<()> {
    if body.success {
        Ok(())
    } else {
        Err(rejected(body.error, action))
    }
}

fn rejected(error: Option<String>, action: &str) -> LectioError {
    LectioError::Api {
        message: error.unwrap_or_else(|| format!("server refused to {}", action)),
    }
}

// ----------------------------------------------------------------------
// Wire payloads and responses
// ----------------------------------------------------------------------

#[derive(Serialize)]
struct HighlightPayload<'a> {
    date: String,
    text: &'a str,
    verse_ref: Option<&'a str>,
    color: &'a str,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    date: String,
    content: &'a str,
    verse_ref: Option<&'a str>,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize)]
struct ContentPayload<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct ReactionPayload<'a> {
    target_type: &'a str,
    target_id: u64,
}

#[derive(Serialize)]
struct PrivacyPayload {
    is_private: bool,
}

#[derive(Serialize)]
struct MarkReadPayload {
    date: String,
    is_read: bool,
}

#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReactionResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    action: Option<ReactionAction>,
    #[serde(default)]
    count: Option<u64>,
}

// The scripture API nests verses as `valasz.versek[]`, each with the
// verse text in `szoveg` and its pretty reference in `hely.szep`.

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "valasz", default)]
    answer: QuoteAnswer,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteAnswer {
    #[serde(rename = "versek", default)]
    verses: Vec<QuoteVerse>,
}

#[derive(Debug, Deserialize)]
struct QuoteVerse {
    #[serde(rename = "szoveg", default)]
    text: String,
    #[serde(rename = "hely", default)]
    place: QuotePlace,
}

#[derive(Debug, Default, Deserialize)]
struct QuotePlace {
    #[serde(rename = "szep", default)]
    reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_payload_shape() {
        let payload = HighlightPayload {
            date: "08-05".to_string(),
            text: "the time came",
            verse_ref: Some("Lk 2,6"),
            color: "yellow",
        };
        let json: serde_json::Value =
            serde_json::to_value(payload).expect("payload should serialize");
        assert_eq!(json["date"], "08-05");
        assert_eq!(json["text"], "the time came");
        assert_eq!(json["verse_ref"], "Lk 2,6");
        assert_eq!(json["color"], "yellow");
    }

    #[test]
    fn test_comment_payload_sends_type_field() {
        let payload = CommentPayload {
            date: "08-05".to_string(),
            content: "Worth rereading.",
            verse_ref: None,
            kind: "comment",
        };
        let json: serde_json::Value =
            serde_json::to_value(payload).expect("payload should serialize");
        assert_eq!(json["type"], "comment");
        assert!(json["verse_ref"].is_null());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_reaction_and_privacy_payload_shapes() {
        let json: serde_json::Value = serde_json::to_value(ReactionPayload {
            target_type: "highlight",
            target_id: 7,
        })
        .expect("payload should serialize");
        assert_eq!(json["target_type"], "highlight");
        assert_eq!(json["target_id"], 7);

        let json: serde_json::Value = serde_json::to_value(PrivacyPayload { is_private: true })
            .expect("payload should serialize");
        assert_eq!(json["is_private"], true);

        let json: serde_json::Value = serde_json::to_value(MarkReadPayload {
            date: "08-05".to_string(),
            is_read: false,
        })
        .expect("payload should serialize");
        assert_eq!(json["is_read"], false);
    }

    #[test]
    fn test_save_response_success() {
        let body: SaveResponse =
            serde_json::from_str(r#"{"success": true, "id": 42, "username": "anna"}"#)
                .expect("response should parse");
        let (id, username) = saved(body, "highlight").expect("saved response");
        assert_eq!(id, 42);
        assert_eq!(username, "anna");
    }

    #[test]
    fn test_save_response_failure_carries_server_message() {
        let body: SaveResponse =
            serde_json::from_str(r#"{"success": false, "error": "not logged in"}"#)
                .expect("response should parse");
        let err = saved(body, "highlight").expect_err("rejected response");
        assert!(err.to_string().contains("not logged in"));
    }

    #[test]
    fn test_save_response_missing_echo_is_an_error() {
        let body: SaveResponse =
            serde_json::from_str(r#"{"success": true}"#).expect("response should parse");
        assert!(saved(body, "comment").is_err());
    }

    #[test]
    fn test_reaction_response_wire_shape() {
        let body: ReactionResponse =
            serde_json::from_str(r#"{"success": true, "action": "added", "count": 3}"#)
                .expect("response should parse");
        assert!(body.success);
        assert_eq!(body.action, Some(ReactionAction::Added));
        assert_eq!(body.count, Some(3));
    }

    #[test]
    fn test_quote_response_nested_fields() {
        let body: QuoteResponse = serde_json::from_str(
            r#"{
                "valasz": {
                    "versek": [
                        {"szoveg": "Elment, hogy bejegyezzek.", "hely": {"szep": "Lk 2,5"}},
                        {"szoveg": "Ott-tartozkodasuk alatt.", "hely": {"szep": "Lk 2,6"}}
                    ]
                }
            }"#,
        )
        .expect("response should parse");
        assert_eq!(body.answer.verses.len(), 2);
        assert_eq!(body.answer.verses[0].place.reference, "Lk 2,5");
        assert_eq!(body.answer.verses[1].text, "Ott-tartozkodasuk alatt.");
    }

    #[test]
    fn test_quote_response_tolerates_empty_answer() {
        let body: QuoteResponse =
            serde_json::from_str("{}").expect("empty response should parse");
        assert!(body.answer.verses.is_empty());
    }
}
