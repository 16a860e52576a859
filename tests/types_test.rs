use lectio::api::normalize_for_api;
use lectio::types::*;

#[test]
fn test_annotation_target_as_str_roundtrip() {
    for target in [AnnotationTarget::Comment, AnnotationTarget::Highlight] {
        let s = target.as_str();
        let parsed = AnnotationTarget::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse AnnotationTarget from '{}'", s));
        assert_eq!(target, parsed, "roundtrip failed for '{}'", s);
    }
}

#[test]
fn test_annotation_target_from_str_unknown_returns_none() {
    assert!(AnnotationTarget::from_str("reply").is_none());
    assert!(AnnotationTarget::from_str("").is_none());
}

#[test]
fn test_highlight_optional_flags_default_to_false() {
    let json = r#"{
        "id": 7,
        "username": "anna",
        "verse_ref": "Lk 2,5-6",
        "text": "the time came for her to give birth",
        "color": "yellow"
    }"#;
    let highlight: Highlight = serde_json::from_str(json).expect("highlight should parse");
    assert_eq!(highlight.id, 7);
    assert_eq!(highlight.verse_ref.as_deref(), Some("Lk 2,5-6"));
    assert!(!highlight.own);
    assert!(!highlight.is_private);
}

#[test]
fn test_comment_replies_default_to_empty() {
    let json = r#"{
        "id": 3,
        "username": "marta",
        "verse_ref": null,
        "content": "A good word for today."
    }"#;
    let comment: Comment = serde_json::from_str(json).expect("comment should parse");
    assert!(comment.replies.is_empty());
    assert!(comment.verse_ref.is_none());
}

#[test]
fn test_reaction_action_wire_names() {
    let added: ReactionAction = serde_json::from_str(r#""added""#).expect("should parse");
    assert_eq!(added, ReactionAction::Added);
    let removed: ReactionAction = serde_json::from_str(r#""removed""#).expect("should parse");
    assert_eq!(removed, ReactionAction::Removed);
    assert!(serde_json::from_str::<ReactionAction>(r#""toggled""#).is_err());
}

#[test]
fn test_normalize_for_api_strips_whitespace() {
    assert_eq!(normalize_for_api("1Moz 1-3"), "1Moz1-3");
    assert_eq!(normalize_for_api("Lk 2,5"), "Lk2,5");
    assert_eq!(normalize_for_api("  Mt  5 "), "Mt5");
    assert_eq!(normalize_for_api(""), "");
}
