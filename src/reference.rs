use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Grammar for a verse reference.
///
/// Group 1 is the book token (shortest run of content before the first
/// `chapter,verse` pair), groups 2 and 3 are the chapter and start
/// verse, and the optional tail is either `-verse` (a range within the
/// chapter) or `-chapter,verse` (a range running into a later chapter).
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*(\d+),(\d+)(?:-(?:(\d+),)?(\d+))?$").expect("invalid reference regex")
});

/// A parsed verse reference: a book token, a chapter, and an inclusive
/// verse range that may extend into a later chapter.
///
/// The canonical textual encodings are `"Lk 2,5"` for a single verse,
/// `"Lk 2,5-8"` for a range within one chapter, and `"Lk 2,5-3,1"` for
/// a range spanning chapters. Parsing and rendering round-trip:
/// `parse(r.to_string())` yields `r` for any constructible reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseReference {
    /// Free-text book token, trimmed of surrounding whitespace.
    pub book: String,
    /// Chapter of the first covered verse.
    pub chapter: u32,
    pub start_verse: u32,
    pub end_verse: u32,
    /// Set only when the range runs into a later chapter.
    pub end_chapter: Option<u32>,
}

impl VerseReference {
    /// A reference covering a single verse.
    pub fn verse(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            start_verse: verse,
            end_verse: verse,
            end_chapter: None,
        }
    }

    /// A reference covering a verse range within one chapter.
    ///
    /// Endpoints may be given in either order; they are stored ascending.
    pub fn range(book: impl Into<String>, chapter: u32, start: u32, end: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            start_verse: start.min(end),
            end_verse: start.max(end),
            end_chapter: None,
        }
    }

    /// A reference covering a range that may span chapters.
    ///
    /// Endpoints may be given in either order. A span whose chapters
    /// are equal collapses to the same-chapter form.
    pub fn spanning(
        book: impl Into<String>,
        start_chapter: u32,
        start_verse: u32,
        end_chapter: u32,
        end_verse: u32,
    ) -> Self {
        if start_chapter == end_chapter {
            return Self::range(book, start_chapter, start_verse, end_verse);
        }
        let ((chapter, start), (last_chapter, end)) = if start_chapter < end_chapter {
            ((start_chapter, start_verse), (end_chapter, end_verse))
        } else {
            ((end_chapter, end_verse), (start_chapter, start_verse))
        };
        Self {
            book: book.into(),
            chapter,
            start_verse: start,
            end_verse: end,
            end_chapter: Some(last_chapter),
        }
    }

    /// Parses a reference string, returning `None` for anything that
    /// does not match the grammar.
    ///
    /// Callers must treat `None` as "no reference", not as an error:
    /// malformed strings arrive from free-text fields and are expected
    /// input. Numeric components are base-10; values that do not fit,
    /// zero chapter/verse numbers, and descending ranges all fail to
    /// parse. No bounds checking against real chapter or verse counts
    /// is done; a reference to a verse that does not exist simply
    /// matches no rendered element later.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = REFERENCE_RE.captures(input.trim())?;

        let book = caps.get(1)?.as_str().trim();
        if book.is_empty() {
            return None;
        }
        let chapter: u32 = caps.get(2)?.as_str().parse().ok()?;
        let start_verse: u32 = caps.get(3)?.as_str().parse().ok()?;
        if chapter == 0 || start_verse == 0 {
            return None;
        }

        match (caps.get(4), caps.get(5)) {
            // "Lk 2,5"
            (None, None) => Some(Self::verse(book, chapter, start_verse)),
            // "Lk 2,5-8"
            (None, Some(end)) => {
                let end_verse: u32 = end.as_str().parse().ok()?;
                if end_verse == 0 || end_verse < start_verse {
                    return None;
                }
                Some(Self::range(book, chapter, start_verse, end_verse))
            }
            // "Lk 2,5-3,1"
            (Some(end_chapter), Some(end_verse)) => {
                let end_chapter: u32 = end_chapter.as_str().parse().ok()?;
                let end_verse: u32 = end_verse.as_str().parse().ok()?;
                if end_chapter == 0 || end_verse == 0 || end_chapter < chapter {
                    return None;
                }
                if end_chapter == chapter && end_verse < start_verse {
                    return None;
                }
                Some(Self::spanning(
                    book,
                    chapter,
                    start_verse,
                    end_chapter,
                    end_verse,
                ))
            }
            // The grammar cannot produce an end chapter without an end verse.
            (Some(_), None) => None,
        }
    }

    /// Whether this reference covers exactly one verse.
    pub fn is_single(&self) -> bool {
        self.end_chapter.is_none() && self.start_verse == self.end_verse
    }

    /// Whether the given verse lies within this reference's range.
    ///
    /// Books are compared by exact string equality after trimming.
    pub fn contains(&self, book: &str, chapter: u32, verse: u32) -> bool {
        if book.trim() != self.book {
            return false;
        }
        match self.end_chapter {
            None => {
                chapter == self.chapter
                    && verse >= self.start_verse
                    && verse <= self.end_verse
            }
            Some(end_chapter) => {
                if chapter < self.chapter || chapter > end_chapter {
                    false
                } else if chapter == self.chapter {
                    verse >= self.start_verse
                } else if chapter == end_chapter {
                    verse <= self.end_verse
                } else {
                    true
                }
            }
        }
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_chapter {
            Some(end_chapter) => write!(
                f,
                "{} {},{}-{},{}",
                self.book, self.chapter, self.start_verse, end_chapter, self.end_verse
            ),
            None if self.start_verse == self.end_verse => {
                write!(f, "{} {},{}", self.book, self.chapter, self.start_verse)
            }
            None => write!(
                f,
                "{} {},{}-{}",
                self.book, self.chapter, self.start_verse, self.end_verse
            ),
        }
    }
}
