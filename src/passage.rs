use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::reference::VerseReference;

/// Minimum selected-text length, in characters after trimming, for a
/// selection to be eligible for highlighting. Shorter selections never
/// reach the resolver.
pub const MIN_SELECTION_CHARS: usize = 3;

/// Separator between verses in the rendered passage text. It belongs
/// to no verse: a selection covering only separators touches nothing.
const VERSE_SEPARATOR: &str = " ";

/// Maximum excerpt length shown in the highlight confirmation panel.
const EXCERPT_DISPLAY_CHARS: usize = 100;

/// One rendered verse, carrying its embedded reference string in
/// single-verse form (e.g. `"Lk 2,5"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseElement {
    pub reference: String,
    pub text: String,
}

/// A snapshot of a live text selection over a rendered passage.
///
/// The resolved reference derived from a selection is returned as a
/// value and threaded explicitly into the confirm/submit step; there is
/// no shared "current selection" state anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSpan {
    /// The selected text.
    pub text: String,
    /// Half-open byte range of the selection within the rendered text.
    pub range: Range<usize>,
}

impl SelectionSpan {
    /// The excerpt as shown in the confirmation affordance, clipped to
    /// 100 characters.
    pub fn display_excerpt(&self) -> String {
        let trimmed = self.text.trim();
        if trimmed.chars().count() <= EXCERPT_DISPLAY_CHARS {
            return trimmed.to_string();
        }
        let clipped: String = trimmed.chars().take(EXCERPT_DISPLAY_CHARS).collect();
        format!("{}...", clipped)
    }
}

/// An ordered snapshot of the verse elements of a rendered passage.
///
/// The passage owns the rendered text layout: each verse occupies a
/// contiguous span of `render_text()`, in document order. Every
/// operation is a pure function of this snapshot and its explicit
/// arguments; elements are only read and classified, never mutated,
/// and no operation reaches into ambient state.
#[derive(Debug, Clone)]
pub struct Passage {
    verses: Vec<VerseElement>,
    /// Byte span of each verse's text within the rendered passage.
    spans: Vec<Range<usize>>,
    rendered: String,
}

impl Passage {
    /// Builds a passage snapshot from verse elements in document order.
    pub fn new(verses: Vec<VerseElement>) -> Self {
        let mut rendered = String::new();
        let mut spans = Vec::with_capacity(verses.len());
        for (i, verse) in verses.iter().enumerate() {
            if i > 0 {
                rendered.push_str(VERSE_SEPARATOR);
            }
            let start = rendered.len();
            rendered.push_str(&verse.text);
            spans.push(start..rendered.len());
        }
        Self {
            verses,
            spans,
            rendered,
        }
    }

    pub fn verses(&self) -> &[VerseElement] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// The full rendered passage text.
    pub fn render_text(&self) -> &str {
        &self.rendered
    }

    /// Takes a snapshot of a selection over the rendered text.
    ///
    /// Returns `None` when the range is out of bounds or not on a
    /// character boundary, or when the trimmed selection is shorter
    /// than [`MIN_SELECTION_CHARS`].
    pub fn select(&self, range: Range<usize>) -> Option<SelectionSpan> {
        let text = self.rendered.get(range.clone())?;
        if text.trim().chars().count() < MIN_SELECTION_CHARS {
            return None;
        }
        Some(SelectionSpan {
            text: text.to_string(),
            range,
        })
    }

    /// Selects the first occurrence of `excerpt` in the rendered text.
    pub fn select_text(&self, excerpt: &str) -> Option<SelectionSpan> {
        let start = self.rendered.find(excerpt)?;
        self.select(start..start + excerpt.len())
    }

    /// Derives the minimal reference covering every verse the selection
    /// touches.
    ///
    /// A verse is touched when the selection range intersects its span
    /// in the rendered text. First and last touched verses are taken in
    /// document order, not selection direction. Elements whose embedded
    /// reference does not parse as a single verse never count as
    /// touched. Returns `None` when the selection touches no verse,
    /// regardless of how much text it covers.
    pub fn resolve_selection(&self, selection: &SelectionSpan) -> Option<VerseReference> {
        let mut first: Option<VerseReference> = None;
        let mut last: Option<VerseReference> = None;

        for (verse, span) in self.verses.iter().zip(&self.spans) {
            if !ranges_intersect(&selection.range, span) {
                continue;
            }
            let Some(parsed) = VerseReference::parse(&verse.reference) else {
                continue;
            };
            if !parsed.is_single() {
                continue;
            }
            if first.is_none() {
                first = Some(parsed.clone());
            }
            last = Some(parsed);
        }

        let first = first?;
        let last = last?;

        Some(if first.chapter == last.chapter {
            if first.start_verse == last.start_verse {
                first
            } else {
                VerseReference::range(first.book, first.chapter, first.start_verse, last.start_verse)
            }
        } else {
            VerseReference::spanning(
                first.book,
                first.chapter,
                first.start_verse,
                last.chapter,
                last.start_verse,
            )
        })
    }

    /// Returns, in document order, every element whose embedded
    /// reference falls within the given reference's range.
    ///
    /// Elements are re-parsed with the same grammar; ones that do not
    /// parse as a single verse are skipped. An empty result is not an
    /// error: callers degrade silently (no marking, no scroll).
    pub fn find_elements(&self, reference: &VerseReference) -> Vec<&VerseElement> {
        self.verses
            .iter()
            .filter(|verse| covers(reference, verse))
            .collect()
    }

    /// Index of the first element the reference covers; the scroll
    /// target when the user activates a stored highlight.
    pub fn locate(&self, reference: &VerseReference) -> Option<usize> {
        self.verses.iter().position(|verse| covers(reference, verse))
    }
}

/// Whether a reference covers a verse element's own embedded reference.
fn covers(reference: &VerseReference, verse: &VerseElement) -> bool {
    VerseReference::parse(&verse.reference)
        .filter(|parsed| parsed.is_single())
        .is_some_and(|parsed| reference.contains(&parsed.book, parsed.chapter, parsed.start_verse))
}

/// Non-empty overlap between two half-open byte ranges.
fn ranges_intersect(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
