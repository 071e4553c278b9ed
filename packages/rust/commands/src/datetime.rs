//! Best-effort date/time extraction for `@agenda` text.
//!
//! This is not general natural-language parsing. The grammar is a fixed,
//! enumerated vocabulary: the relative-day words `hoje`, `amanhã`,
//! `depois de amanhã` (accent-optional) and `<N>h` / `<N>:<MM>h` hour
//! tokens, optionally preceded by `às`. Anything outside that vocabulary is
//! left in the title text. A stronger parser can replace this module
//! without touching callers — the typed [`CalendarEvent`] is the contract.

use std::sync::LazyLock;

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;

/// Hour used when the text names no time.
const DEFAULT_HOUR: u32 = 9;

/// Event length when the text names no end.
const DEFAULT_DURATION_HOURS: i64 = 1;

/// A calendar event draft: what a calendar collaborator would be asked to
/// create. Times are naive local times; the collaborator owns the timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    /// Event title: the input text with command and date/time tokens removed.
    pub title: String,
    /// Event start.
    pub start: NaiveDateTime,
    /// Event end (start plus a fixed default duration).
    pub end: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Token patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches `depois de amanhã` (two days ahead). Checked before the plain
/// `amanhã` pattern, which it contains.
static DAY_AFTER_TOMORROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdepois\s+de\s+amanh[ãa]\b").expect("day regex"));

/// Matches `amanhã`.
static TOMORROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bamanh[ãa]\b").expect("day regex"));

/// Matches `hoje`.
static TODAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhoje\b").expect("day regex"));

/// Matches `10h`, `14:30h`, optionally led by `às`/`as`.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\b[àa]s\s+)?\b(\d{1,2})(?::([0-5]\d))?h\b").expect("time regex")
});

/// Matches event lead-in phrases at the start of the remaining text.
static LEAD_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:criar\s+evento\s+para|criar\s+evento|marcar\s+evento\s+para|marcar|evento\s+para|evento)\b")
        .expect("lead-in regex")
});

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract a [`CalendarEvent`] from `@agenda` body text.
///
/// `today` anchors the relative-day vocabulary. Missing day → `today`;
/// missing time → 09:00; end = start + 1 hour. The title is whatever text
/// remains after removing the recognized tokens, or `"Evento"` when nothing
/// remains.
pub fn extract_event(body: &str, today: NaiveDate) -> CalendarEvent {
    let mut text = body.to_string();

    // Day tokens: longest vocabulary first
    let day_offset = [
        (&*DAY_AFTER_TOMORROW_RE, 2u64),
        (&*TOMORROW_RE, 1),
        (&*TODAY_RE, 0),
    ]
    .iter()
    .find_map(|(re, offset)| {
        let range = re.find(&text).map(|m| m.range())?;
        text.replace_range(range, " ");
        Some(*offset)
    })
    .unwrap_or(0);

    // Hour token
    let parsed_time = TIME_RE.captures(&text).map(|caps| {
        let hour: u32 = caps[1].parse().unwrap_or(DEFAULT_HOUR);
        let minute: u32 = caps
            .get(2)
            .map(|m| m.as_str().parse().unwrap_or(0))
            .unwrap_or(0);
        (hour, minute, caps.get(0).map(|m| m.range()))
    });
    let (hour, minute) = match parsed_time {
        Some((hour, minute, range)) => {
            if let Some(range) = range {
                text.replace_range(range, " ");
            }
            if hour <= 23 { (hour, minute) } else { (DEFAULT_HOUR, 0) }
        }
        None => (DEFAULT_HOUR, 0),
    };

    let date = today
        .checked_add_days(Days::new(day_offset))
        .unwrap_or(today);
    let start = date
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_else(|| date.and_hms_opt(DEFAULT_HOUR, 0, 0).expect("valid default time"));
    let end = start + Duration::hours(DEFAULT_DURATION_HOURS);

    CalendarEvent {
        title: clean_title(&text),
        start,
        end,
    }
}

/// Normalize the leftover text into a title.
fn clean_title(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = LEAD_IN_RE.replace(&collapsed, "");
    let title = stripped
        .trim_matches([' ', ',', '.', ':', '-'])
        .to_string();

    if title.is_empty() {
        "Evento".to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn tomorrow_with_hour_token() {
        let event = extract_event("criar evento para reunião amanhã às 10h", today());
        assert_eq!(event.title, "reunião");
        assert_eq!(event.start, dt(2025, 3, 11, 10, 0));
        assert_eq!(event.end, dt(2025, 3, 11, 11, 0));
    }

    #[test]
    fn day_after_tomorrow_beats_tomorrow() {
        let event = extract_event("entrevista depois de amanhã às 14h", today());
        assert_eq!(event.title, "entrevista");
        assert_eq!(event.start, dt(2025, 3, 12, 14, 0));
    }

    #[test]
    fn hoje_keeps_reference_date() {
        let event = extract_event("revisão de currículo hoje às 16h", today());
        assert_eq!(event.start, dt(2025, 3, 10, 16, 0));
    }

    #[test]
    fn missing_day_defaults_to_reference_date() {
        let event = extract_event("mentoria às 11h", today());
        assert_eq!(event.start, dt(2025, 3, 10, 11, 0));
    }

    #[test]
    fn missing_time_defaults_to_morning() {
        let event = extract_event("planejamento amanhã", today());
        assert_eq!(event.start, dt(2025, 3, 11, 9, 0));
    }

    #[test]
    fn minutes_token_supported() {
        let event = extract_event("reunião hoje às 14:30h", today());
        assert_eq!(event.start, dt(2025, 3, 10, 14, 30));
    }

    #[test]
    fn accentless_vocabulary_accepted() {
        let event = extract_event("reuniao amanha as 10h", today());
        assert_eq!(event.start, dt(2025, 3, 11, 10, 0));
        assert_eq!(event.title, "reuniao");
    }

    #[test]
    fn empty_body_yields_placeholder_title() {
        let event = extract_event("", today());
        assert_eq!(event.title, "Evento");
        assert_eq!(event.start, dt(2025, 3, 10, 9, 0));
    }

    #[test]
    fn out_of_range_hour_falls_back_to_default() {
        let event = extract_event("virada amanhã às 31h", today());
        assert_eq!(event.start, dt(2025, 3, 11, 9, 0));
    }

    #[test]
    fn day_token_crosses_month_boundary() {
        let end_of_month = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let event = extract_event("fechamento amanhã às 10h", end_of_month);
        assert_eq!(event.start, dt(2025, 4, 1, 10, 0));
    }
}
