//! Typed recognition of `@`-prefixed productivity commands.
//!
//! User input beginning with a reserved prefix (`@agenda`, `@sheet`, ...)
//! is parsed into a [`Command`] value here; acting on the command (calendar
//! and spreadsheet APIs) is the caller's business. Recognition is decoupled
//! from the side-effecting action, so everything in this crate is pure.

mod datetime;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

pub use datetime::{CalendarEvent, extract_event};

/// Result of parsing one line of user input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Not a command: a plain question to answer with the LLM.
    Question { text: String },
    /// `@agenda` — a calendar event draft extracted from the free text.
    Calendar(CalendarEvent),
    /// `@sheet` — a spreadsheet creation request.
    Sheet { name: String },
    /// An `@` prefix with no supported action (e.g. `@keep`).
    Unrecognized { prefix: String },
}

/// Parse one line of user input.
///
/// `today` anchors relative-day vocabulary in `@agenda` text; callers pass
/// the current date, tests pass a fixed one.
pub fn parse(input: &str, today: NaiveDate) -> Command {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('@') else {
        return Command::Question {
            text: trimmed.to_string(),
        };
    };

    let (prefix, body) = match rest.split_once(char::is_whitespace) {
        Some((prefix, body)) => (prefix, body.trim()),
        None => (rest, ""),
    };

    debug!(prefix, "command prefix recognized");

    match prefix.to_lowercase().as_str() {
        "agenda" => Command::Calendar(extract_event(body, today)),
        "sheet" => Command::Sheet {
            name: sheet_name(body),
        },
        _ => Command::Unrecognized {
            prefix: prefix.to_string(),
        },
    }
}

/// Pull the spreadsheet name out of `@sheet` body text.
fn sheet_name(body: &str) -> String {
    let lead_ins = [
        "criar planilha chamada",
        "criar planilha",
        "nova planilha",
        "planilha",
    ];

    let mut name = body.trim();
    for lead in lead_ins {
        if let Some(stripped) = strip_prefix_ci(name, lead) {
            name = stripped.trim_start_matches([' ', ':', '-']).trim();
            break;
        }
    }

    if name.is_empty() {
        "Planilha".to_string()
    } else {
        name.to_string()
    }
}

/// Case-insensitive prefix strip.
fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn plain_text_is_a_question() {
        let cmd = parse("Quais habilidades preciso para Data Science?", today());
        assert_eq!(
            cmd,
            Command::Question {
                text: "Quais habilidades preciso para Data Science?".into()
            }
        );
    }

    #[test]
    fn agenda_prefix_yields_calendar_command() {
        let cmd = parse("@agenda criar evento para reunião amanhã às 10h", today());
        match cmd {
            Command::Calendar(event) => {
                assert_eq!(event.title, "reunião");
                assert_eq!(event.start.date(), today().succ_opt().unwrap());
            }
            other => panic!("expected Calendar, got {other:?}"),
        }
    }

    #[test]
    fn sheet_prefix_yields_sheet_command() {
        let cmd = parse("@sheet criar planilha chamada Gastos do mês", today());
        assert_eq!(
            cmd,
            Command::Sheet {
                name: "Gastos do mês".into()
            }
        );
    }

    #[test]
    fn sheet_without_name_gets_default() {
        let cmd = parse("@sheet", today());
        assert_eq!(
            cmd,
            Command::Sheet {
                name: "Planilha".into()
            }
        );
    }

    #[test]
    fn keep_prefix_is_unrecognized() {
        let cmd = parse("@keep criar anotação sobre carreira de dados", today());
        assert_eq!(
            cmd,
            Command::Unrecognized {
                prefix: "keep".into()
            }
        );
    }

    #[test]
    fn prefix_matching_ignores_case_and_surrounding_space() {
        let cmd = parse("  @Agenda reunião hoje às 14h  ", today());
        assert!(matches!(cmd, Command::Calendar(_)));
    }

    #[test]
    fn at_mid_sentence_is_not_a_command() {
        let cmd = parse("fale sobre o @agenda do time", today());
        assert!(matches!(cmd, Command::Question { .. }));
    }

    #[test]
    fn command_serializes_with_tag() {
        let cmd = parse("@sheet Orçamento", today());
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains(r#""command":"sheet"#));
    }
}
