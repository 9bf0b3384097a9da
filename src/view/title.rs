use std::sync::OnceLock;

use regex::Regex;

/// Known market question templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleTemplate {
    /// "Who will win the X?"
    WhoWillWin,
    /// "X Governor's Race: Which party will win in 2024?"
    GovernorsRace,
    /// "... race in STATE in 2024 (DETAIL)?"
    StateRace,
    /// "Which party will win the US Presidency in X?"
    PresidencyInState,
}

impl TitleTemplate {
    fn regex(&self) -> &'static Regex {
        static WHO_WILL_WIN: OnceLock<Regex> = OnceLock::new();
        static GOVERNORS_RACE: OnceLock<Regex> = OnceLock::new();
        static STATE_RACE: OnceLock<Regex> = OnceLock::new();
        static PRESIDENCY: OnceLock<Regex> = OnceLock::new();

        let (cell, pattern) = match self {
            TitleTemplate::WhoWillWin => (&WHO_WILL_WIN, r"Who will win the (.+?)\?"),
            TitleTemplate::GovernorsRace => (
                &GOVERNORS_RACE,
                r"^(.+?) Governor's Race: Which party will win in \d{4}\?",
            ),
            TitleTemplate::StateRace => (
                &STATE_RACE,
                r"race in ([\w\s.]+?) in \d{4}(?:\s*\(([^)]+)\))?\?",
            ),
            TitleTemplate::PresidencyInState => (&PRESIDENCY, r"US Presidency in ([\w\s,.()'-]+)\?"),
        };

        // Patterns are fixed literals
        cell.get_or_init(|| Regex::new(pattern).expect("title template regex is valid"))
    }
}

/// Pull the subject (state, race, office) out of a templated question
pub fn extract_subject(question: &str, template: TitleTemplate) -> Option<String> {
    let caps = template.regex().captures(question)?;
    let subject = caps.get(1)?.as_str().trim();
    if subject.is_empty() {
        return None;
    }

    let detail = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|d| !d.is_empty());

    Some(match detail {
        Some(detail) => format!("{} ({})", subject, detail),
        None => subject.to_string(),
    })
}

/// Subject of the question, or the raw question when it does not match
pub fn display_title(question: &str, template: TitleTemplate) -> String {
    extract_subject(question, template).unwrap_or_else(|| question.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_who_will_win() {
        assert_eq!(
            extract_subject("Who will win the Texas Governor race?", TitleTemplate::WhoWillWin),
            Some("Texas Governor race".to_string())
        );
    }

    #[test]
    fn test_governors_race() {
        assert_eq!(
            extract_subject(
                "North Carolina Governor's Race: Which party will win in 2024?",
                TitleTemplate::GovernorsRace
            ),
            Some("North Carolina".to_string())
        );
    }

    #[test]
    fn test_state_race_with_detail() {
        assert_eq!(
            extract_subject(
                "Which party will win the Senate race in Nebraska in 2024 (Special Election)?",
                TitleTemplate::StateRace
            ),
            Some("Nebraska (Special Election)".to_string())
        );
        assert_eq!(
            extract_subject(
                "Which party will win the Senate race in Ohio in 2024?",
                TitleTemplate::StateRace
            ),
            Some("Ohio".to_string())
        );
    }

    #[test]
    fn test_presidency_in_state() {
        assert_eq!(
            extract_subject(
                "Which party will win the US Presidency in Maine (CD-2)?",
                TitleTemplate::PresidencyInState
            ),
            Some("Maine (CD-2)".to_string())
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        for template in [
            TitleTemplate::WhoWillWin,
            TitleTemplate::GovernorsRace,
            TitleTemplate::StateRace,
            TitleTemplate::PresidencyInState,
        ] {
            assert_eq!(extract_subject("Will it rain tomorrow?", template), None);
            assert_eq!(extract_subject("", template), None);
        }
    }

    #[test]
    fn test_display_title_falls_back_to_question() {
        assert_eq!(
            display_title("Will it rain tomorrow?", TitleTemplate::WhoWillWin),
            "Will it rain tomorrow?"
        );
        assert_eq!(
            display_title("Who will win the Super Bowl?", TitleTemplate::WhoWillWin),
            "Super Bowl"
        );
    }
}
