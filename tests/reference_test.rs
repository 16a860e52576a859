use lectio::reference::VerseReference;

#[test]
fn test_parse_single_verse() {
    let parsed = VerseReference::parse("Lk 2,5").expect("should parse a single verse");
    assert_eq!(parsed.book, "Lk");
    assert_eq!(parsed.chapter, 2);
    assert_eq!(parsed.start_verse, 5);
    assert_eq!(parsed.end_verse, 5);
    assert!(parsed.end_chapter.is_none());
    assert!(parsed.is_single());
}

#[test]
fn test_parse_same_chapter_range() {
    let parsed = VerseReference::parse("Lk 2,5-8").expect("should parse a verse range");
    assert_eq!(parsed.book, "Lk");
    assert_eq!(parsed.chapter, 2);
    assert_eq!(parsed.start_verse, 5);
    assert_eq!(parsed.end_verse, 8);
    assert!(parsed.end_chapter.is_none());
    assert!(!parsed.is_single());
}

#[test]
fn test_parse_cross_chapter_range() {
    let parsed = VerseReference::parse("Lk 2,5-3,1").expect("should parse a cross-chapter range");
    assert_eq!(parsed.book, "Lk");
    assert_eq!(parsed.chapter, 2);
    assert_eq!(parsed.start_verse, 5);
    assert_eq!(parsed.end_chapter, Some(3));
    assert_eq!(parsed.end_verse, 1);
}

#[test]
fn test_parse_numbered_book() {
    let parsed = VerseReference::parse("1Pt 2,5").expect("should parse a numbered book");
    assert_eq!(parsed.book, "1Pt");
    assert_eq!(parsed.chapter, 2);
    assert_eq!(parsed.start_verse, 5);
}

#[test]
fn test_parse_trims_whitespace() {
    let parsed = VerseReference::parse("  Lk  2,5  ").expect("should tolerate padding");
    assert_eq!(parsed.book, "Lk");
    assert_eq!(parsed.to_string(), "Lk 2,5");
}

#[test]
fn test_parse_rejects_non_references() {
    for input in [
        "not a reference",
        "",
        "Lk",
        "Lk 2",
        "Lk 2,",
        "Lk 2:5",
        "Lk x,5",
        "2,5",
        "Lk 2,5-",
        "Lk 2,5-8,",
    ] {
        assert!(
            VerseReference::parse(input).is_none(),
            "'{}' should not parse",
            input
        );
    }
}

#[test]
fn test_parse_rejects_zero_components() {
    assert!(VerseReference::parse("Lk 0,5").is_none());
    assert!(VerseReference::parse("Lk 2,0").is_none());
    assert!(VerseReference::parse("Lk 2,5-0").is_none());
    assert!(VerseReference::parse("Lk 2,5-0,3").is_none());
}

#[test]
fn test_parse_rejects_descending_ranges() {
    assert!(VerseReference::parse("Lk 2,8-5").is_none());
    assert!(VerseReference::parse("Lk 3,1-2,5").is_none());
    assert!(VerseReference::parse("Lk 2,8-2,5").is_none());
}

#[test]
fn test_parse_rejects_overflowing_numbers() {
    assert!(VerseReference::parse("Lk 99999999999999999999,5").is_none());
    assert!(VerseReference::parse("Lk 2,99999999999999999999").is_none());
}

#[test]
fn test_parse_normalizes_same_chapter_span() {
    let parsed = VerseReference::parse("Lk 2,5-2,8").expect("should parse");
    assert!(parsed.end_chapter.is_none(), "equal chapters collapse");
    assert_eq!(parsed.to_string(), "Lk 2,5-8");
}

#[test]
fn test_render_round_trip() {
    let references = vec![
        VerseReference::verse("Lk", 2, 5),
        VerseReference::range("Lk", 2, 5, 8),
        VerseReference::spanning("Lk", 2, 5, 3, 1),
        VerseReference::verse("1Jn", 1, 9),
        VerseReference::range("Zsolt", 119, 1, 176),
        VerseReference::spanning("Mt", 5, 1, 7, 29),
    ];

    for reference in references {
        let rendered = reference.to_string();
        let parsed = VerseReference::parse(&rendered)
            .unwrap_or_else(|| panic!("failed to re-parse '{}'", rendered));
        assert_eq!(reference, parsed, "round trip failed for '{}'", rendered);
    }
}

#[test]
fn test_single_verse_renders_without_range_suffix() {
    assert_eq!(VerseReference::verse("Lk", 2, 5).to_string(), "Lk 2,5");
    assert_eq!(VerseReference::range("Lk", 2, 5, 5).to_string(), "Lk 2,5");
}

#[test]
fn test_constructors_normalize_order() {
    let swapped = VerseReference::range("Lk", 2, 8, 5);
    assert_eq!(swapped.start_verse, 5);
    assert_eq!(swapped.end_verse, 8);

    let swapped = VerseReference::spanning("Lk", 3, 1, 2, 5);
    assert_eq!(swapped.chapter, 2);
    assert_eq!(swapped.start_verse, 5);
    assert_eq!(swapped.end_chapter, Some(3));
    assert_eq!(swapped.end_verse, 1);

    let collapsed = VerseReference::spanning("Lk", 2, 5, 2, 8);
    assert!(collapsed.end_chapter.is_none());
    assert_eq!(collapsed.end_verse, 8);
}

#[test]
fn test_contains_same_chapter_range() {
    let reference = VerseReference::range("Lk", 2, 5, 8);
    assert!(reference.contains("Lk", 2, 5));
    assert!(reference.contains("Lk", 2, 7));
    assert!(reference.contains("Lk", 2, 8));
    assert!(!reference.contains("Lk", 2, 4));
    assert!(!reference.contains("Lk", 2, 9));
    assert!(!reference.contains("Lk", 3, 5));
    assert!(!reference.contains("Mt", 2, 5));
}

#[test]
fn test_contains_cross_chapter_range() {
    let reference = VerseReference::spanning("Lk", 2, 5, 4, 3);
    assert!(reference.contains("Lk", 2, 5));
    assert!(reference.contains("Lk", 2, 99));
    assert!(reference.contains("Lk", 3, 1));
    assert!(reference.contains("Lk", 3, 50));
    assert!(reference.contains("Lk", 4, 1));
    assert!(reference.contains("Lk", 4, 3));
    assert!(!reference.contains("Lk", 2, 4));
    assert!(!reference.contains("Lk", 4, 4));
    assert!(!reference.contains("Lk", 1, 9));
    assert!(!reference.contains("Lk", 5, 1));
}

#[test]
fn test_contains_trims_book() {
    let reference = VerseReference::verse("Lk", 2, 5);
    assert!(reference.contains(" Lk ", 2, 5));
}
