use serde::{Deserialize, Serialize};

/// Kinds of content a reaction or privacy toggle can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationTarget {
    Comment,
    Highlight,
}

#[allow(clippy::should_implement_trait)]
impl AnnotationTarget {
    /// Returns the string used for this target in API paths and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationTarget::Comment => "comment",
            AnnotationTarget::Highlight => "highlight",
        }
    }

    /// Parses a string into an `AnnotationTarget`, returning `None` for
    /// unrecognized values.
    pub fn from_str(s: &str) -> Option<AnnotationTarget> {
        match s {
            "comment" => Some(AnnotationTarget::Comment),
            "highlight" => Some(AnnotationTarget::Highlight),
            _ => None,
        }
    }
}

/// A saved highlight: a verse reference bound to a text excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: u64,
    pub username: String,
    /// Serialized reference string, verbatim as submitted.
    pub verse_ref: Option<String>,
    /// The highlighted excerpt.
    pub text: String,
    pub color: String,
    /// Whether the highlight belongs to the current user.
    #[serde(default)]
    pub own: bool,
    #[serde(default)]
    pub is_private: bool,
}

/// A comment on a reading day, optionally anchored to a verse reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub username: String,
    pub verse_ref: Option<String>,
    pub content: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(default)]
    pub is_private: bool,
}

/// A reply nested under a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: u64,
    pub username: String,
    pub content: String,
}

/// What a reaction toggle did on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Added,
    Removed,
}

/// Server acknowledgement for a reaction toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionAck {
    pub action: ReactionAction,
    /// Reaction count after the toggle.
    pub count: u64,
}
