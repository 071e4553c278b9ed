//! Core domain types for career extraction.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CareerSummary
// ---------------------------------------------------------------------------

/// A career entry found on the listing page: display name + detail-page URL.
///
/// Within one listing result no two entries share the same `(name, url)`
/// pair. Entries are constructed fresh on every listing fetch and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CareerSummary {
    /// Display text of the career link (non-empty, trimmed).
    pub name: String,
    /// Absolute URL of the career's detail page.
    pub url: String,
}

// ---------------------------------------------------------------------------
// DetailSection
// ---------------------------------------------------------------------------

/// One substantive content section extracted from a career detail page.
///
/// Sections appear in document order across the mixed heading/list stream.
/// A `List` survives extraction only if it is non-empty after trimming and
/// none of its items matches the list denylist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailSection {
    /// A top- or sub-level heading (h2/h3), trimmed.
    Heading { text: String },
    /// An unordered or ordered list; items keep document order.
    List { items: Vec<String> },
}

impl DetailSection {
    /// Heading text, if this section is a heading.
    pub fn heading_text(&self) -> Option<&str> {
        match self {
            Self::Heading { text } => Some(text),
            Self::List { .. } => None,
        }
    }

    /// List items, if this section is a list.
    pub fn list_items(&self) -> Option<&[String]> {
        match self {
            Self::Heading { .. } => None,
            Self::List { items } => Some(items),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregated context
// ---------------------------------------------------------------------------

/// One career's extracted sections, in listing order within the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerBlock {
    /// The career this block describes.
    pub career: CareerSummary,
    /// Filtered sections in document order.
    pub sections: Vec<DetailSection>,
}

/// A career whose detail fetch failed during aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerFailure {
    /// The career that could not be fetched.
    pub career: CareerSummary,
    /// Rendered error message.
    pub error: String,
}

/// The full site context: every listed career's filtered sections, plus the
/// careers that failed when running under the skip-and-continue policy.
///
/// Block order matches the listing order; section order within a block
/// matches document order. Recomputed on demand, never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregatedContext {
    /// Per-career blocks in listing order.
    pub blocks: Vec<CareerBlock>,
    /// Careers skipped due to fetch failures (empty under abort policy).
    pub failures: Vec<CareerFailure>,
}

impl AggregatedContext {
    /// Render the aggregate as prompt-context text.
    ///
    /// Per career: a `Carreira: <name>` line, one indented line per heading,
    /// a further-indented bullet per list item, then a blank separator line.
    /// Output length is unbounded; callers feeding a size-limited model must
    /// truncate or chunk themselves.
    pub fn render(&self) -> String {
        let mut out: Vec<String> = Vec::new();
        for block in &self.blocks {
            out.push(format!("Carreira: {}", block.career.name));
            for section in &block.sections {
                match section {
                    DetailSection::Heading { text } => out.push(format!("  {text}")),
                    DetailSection::List { items } => {
                        out.push(format!("    - {}", items.join("\n    - ")));
                    }
                }
            }
            out.push(String::new());
        }
        out.join("\n")
    }
}
