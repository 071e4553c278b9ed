//! Prompt construction for the Gemini bridge.
//!
//! The core produces prompt strings only; it never interprets the model's
//! output beyond the trimming the bridge already does. Templates are the
//! Portuguese specialist prompts the assistant ships with.

use careerguide_shared::DetailSection;

/// Specialist framing prepended to every career prompt.
const SPECIALIST_PREAMBLE: &str = "Você é um especialista em carreiras de tecnologia.";

/// Render one career's sections as inline prompt context: headings as-is,
/// list items comma-joined, one line per section.
pub fn career_context(sections: &[DetailSection]) -> String {
    sections
        .iter()
        .map(|section| match section {
            DetailSection::Heading { text } => text.clone(),
            DetailSection::List { items } => items.join(", "),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking for a detailed standalone summary of one career.
pub fn summary_prompt(career_name: &str, context: &str) -> String {
    format!(
        "{SPECIALIST_PREAMBLE} Responda tudo sobre a área '{career_name}' com base nas \
         informações abaixo extraídas do site TechGuide.sh. Seja detalhado e cite as \
         habilidades, tópicos, níveis e recomendações relevantes.\n\n{context}"
    )
}

/// Prompt answering a user question about one career, grounded in the
/// extracted context.
pub fn question_prompt(career_name: &str, context: &str, question: &str) -> String {
    format!(
        "{SPECIALIST_PREAMBLE} Responda tudo sobre a área '{career_name}' com base nas \
         informações abaixo extraídas do site TechGuide.sh.\n\n{context}\n\n\
         Pergunta do usuário: {question}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<DetailSection> {
        vec![
            DetailSection::Heading {
                text: "Habilidades necessárias".into(),
            },
            DetailSection::List {
                items: vec!["Python".into(), "SQL".into()],
            },
        ]
    }

    #[test]
    fn career_context_joins_sections_by_line() {
        let context = career_context(&sections());
        assert_eq!(context, "Habilidades necessárias\nPython, SQL");
    }

    #[test]
    fn career_context_of_nothing_is_empty() {
        assert_eq!(career_context(&[]), "");
    }

    #[test]
    fn summary_prompt_embeds_career_and_context() {
        let prompt = summary_prompt("Data Science", "Python, SQL");
        assert!(prompt.starts_with(SPECIALIST_PREAMBLE));
        assert!(prompt.contains("'Data Science'"));
        assert!(prompt.ends_with("Python, SQL"));
        assert!(prompt.contains("Seja detalhado"));
    }

    #[test]
    fn question_prompt_puts_question_last() {
        let prompt = question_prompt("DevOps", "Docker, Kubernetes", "Por onde começo?");
        assert!(prompt.contains("Docker, Kubernetes"));
        assert!(prompt.ends_with("Pergunta do usuário: Por onde começo?"));
    }
}
