//! Career Detail Extractor: turn one career page into an ordered stream of
//! filtered [`DetailSection`]s.

use regex::{Regex, RegexBuilder};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use careerguide_shared::{CareerGuideError, DetailSection, FilterConfig, Result};

use crate::fetch_html;

// ---------------------------------------------------------------------------
// SectionFilter
// ---------------------------------------------------------------------------

/// Compiled denylists applied during extraction.
///
/// Patterns match case-insensitively anywhere in the trimmed text. The
/// heading denylist covers institutional/footer/marketing phrases; the list
/// denylist is the narrower social-platform set that disqualifies a whole
/// list when any item matches.
#[derive(Debug, Clone)]
pub struct SectionFilter {
    heading_deny: Option<Regex>,
    list_deny: Option<Regex>,
}

impl SectionFilter {
    /// Compile a filter from configured denylists. Patterns are treated as
    /// literal vocabulary, not regex syntax.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        Ok(Self {
            heading_deny: compile_denylist(&config.heading_denylist)?,
            list_deny: compile_denylist(&config.list_denylist)?,
        })
    }

    fn heading_denied(&self, text: &str) -> bool {
        self.heading_deny.as_ref().is_some_and(|re| re.is_match(text))
    }

    fn item_denied(&self, text: &str) -> bool {
        self.list_deny.as_ref().is_some_and(|re| re.is_match(text))
    }
}

impl Default for SectionFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default()).expect("default denylists compile")
    }
}

/// Build one case-insensitive alternation from literal patterns.
/// An empty denylist compiles to `None` (matches nothing).
fn compile_denylist(patterns: &[String]) -> Result<Option<Regex>> {
    let alternation = patterns
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| regex::escape(p.trim()))
        .collect::<Vec<_>>()
        .join("|");

    if alternation.is_empty() {
        return Ok(None);
    }

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| CareerGuideError::validation(format!("invalid denylist pattern: {e}")))
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Fetch a career detail page and extract its filtered sections.
///
/// Issues exactly one outbound read; an empty result is valid (a page with
/// no substantive content).
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_details(
    client: &Client,
    url: &Url,
    filter: &SectionFilter,
) -> Result<Vec<DetailSection>> {
    let body = fetch_html(client, url.as_str()).await?;
    let sections = extract_sections(&body, filter);

    info!(count = sections.len(), "detail sections extracted");
    Ok(sections)
}

/// Extract the substantive sections of a detail page, in document order.
///
/// The primary content region is the document's `<main>` element; a page
/// without one degrades to scanning the whole document (never an error).
/// Headings (h2/h3) and lists (ul/ol) are captured wherever they appear
/// within that region, regardless of nesting depth — a heading and a list
/// need not be siblings, and their output order is their order of
/// appearance in the markup.
pub fn extract_sections(html: &str, filter: &SectionFilter) -> Vec<DetailSection> {
    let doc = Html::parse_document(html);

    let main_sel = Selector::parse("main").expect("main selector");
    match doc.select(&main_sel).next() {
        Some(main) => sections_within(main, filter),
        None => {
            debug!("no <main> region, scanning full document");
            sections_within(doc.root_element(), filter)
        }
    }
}

/// Walk `h2, h3, ul, ol` descendants of `region` in document order and
/// apply the denylist filters.
fn sections_within(region: ElementRef<'_>, filter: &SectionFilter) -> Vec<DetailSection> {
    let section_sel = Selector::parse("h2, h3, ul, ol").expect("section selector");
    let item_sel = Selector::parse("li").expect("item selector");

    let mut sections: Vec<DetailSection> = Vec::new();

    for el in region.select(&section_sel) {
        match el.value().name() {
            "h2" | "h3" => {
                let text = el.text().collect::<String>().trim().to_string();
                if !filter.heading_denied(&text) {
                    sections.push(DetailSection::Heading { text });
                }
            }
            "ul" | "ol" => {
                let items: Vec<String> = el
                    .select(&item_sel)
                    .map(|li| li.text().collect::<String>().trim().to_string())
                    .collect();

                if items.is_empty() || items.iter().any(|item| filter.item_denied(item)) {
                    continue;
                }
                sections.push(DetailSection::List { items });
            }
            _ => {}
        }
    }

    sections
}
