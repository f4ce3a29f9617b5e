//! Field validation for catalog records.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use crate::models::GameDraft;

pub const MAX_PLATFORM_LEN: usize = 100;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_GENRE_LEN: usize = 200;
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Playtime such as `12h`, `45m` or `3h 20m`.
static PLAYTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+h)?\s*(\d+m)?$").expect("invalid playtime regex"));

/// Checks every field and returns all failures; an empty list means valid.
pub fn validate(draft: &GameDraft) -> Vec<String> {
    let mut errors = Vec::new();

    let plataforma = draft.plataforma.trim();
    if plataforma.is_empty() {
        errors.push("plataforma is required".to_string());
    } else if plataforma.chars().count() > MAX_PLATFORM_LEN {
        errors.push(format!(
            "plataforma must be at most {} characters",
            MAX_PLATFORM_LEN
        ));
    }

    let nome = draft.nome.trim();
    if nome.is_empty() {
        errors.push("nome is required".to_string());
    } else if nome.chars().count() > MAX_NAME_LEN {
        errors.push(format!("nome must be at most {} characters", MAX_NAME_LEN));
    }

    if let Some(genero) = present(&draft.genero) {
        if genero.chars().count() > MAX_GENRE_LEN {
            errors.push(format!("genero must be at most {} characters", MAX_GENRE_LEN));
        }
    }

    if let Some(nota) = draft.nota {
        if !nota.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&nota) {
            errors.push(format!(
                "nota must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            ));
        }
    }

    for (field, value) in [
        ("dataLancamento", &draft.data_lancamento),
        ("inicio", &draft.inicio),
        ("fim", &draft.fim),
    ] {
        if let Some(value) = present(value) {
            if !is_date(value) {
                errors.push(format!("{} is not a valid date: {}", field, value));
            }
        }
    }

    if let Some(tempo) = present(&draft.tempo) {
        if !is_playtime(tempo) {
            errors.push(format!(
                "tempo must look like 12h, 30m or 12h 30m: {}",
                tempo
            ));
        }
    }

    errors
}

/// `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

/// Matches the playtime grammar and names at least one unit.
pub fn is_playtime(value: &str) -> bool {
    PLAYTIME.is_match(value) && value.contains(['h', 'm'])
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minimal_draft_is_valid() {
        assert!(validate(&GameDraft::new("PC", "Hades")).is_empty());
    }

    #[test]
    fn test_reports_every_failure() {
        let draft = GameDraft {
            nota: Some(11.0),
            tempo: Some("lots".to_string()),
            fim: Some("31/12/2024".to_string()),
            ..GameDraft::new("", "  ")
        };

        let errors = validate(&draft);
        assert_eq!(errors.len(), 5, "{:?}", errors);
        assert!(errors.iter().any(|e| e.starts_with("plataforma")));
        assert!(errors.iter().any(|e| e.starts_with("nome")));
        assert!(errors.iter().any(|e| e.starts_with("nota")));
        assert!(errors.iter().any(|e| e.starts_with("tempo")));
        assert!(errors.iter().any(|e| e.starts_with("fim")));
    }

    #[test]
    fn test_length_limits() {
        let draft = GameDraft {
            genero: Some("g".repeat(MAX_GENRE_LEN + 1)),
            ..GameDraft::new("p".repeat(MAX_PLATFORM_LEN + 1), "n".repeat(MAX_NAME_LEN))
        };

        let errors = validate(&draft);
        assert_eq!(errors.len(), 2, "{:?}", errors);
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        for nota in [0.0, 10.0, 7.5] {
            let draft = GameDraft {
                nota: Some(nota),
                ..GameDraft::new("PC", "A")
            };
            assert!(validate(&draft).is_empty(), "nota {}", nota);
        }
        for nota in [-0.1, 10.01, f64::NAN] {
            let draft = GameDraft {
                nota: Some(nota),
                ..GameDraft::new("PC", "A")
            };
            assert_eq!(validate(&draft).len(), 1, "nota {}", nota);
        }
    }

    #[test]
    fn test_empty_optional_fields_are_skipped() {
        let draft = GameDraft {
            data_lancamento: Some(String::new()),
            tempo: Some("  ".to_string()),
            inicio: Some(String::new()),
            ..GameDraft::new("PC", "A")
        };
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_dates() {
        assert!(is_date("2024-02-29"));
        assert!(is_date("2024-02-29T10:00:00Z"));
        assert!(!is_date("2023-02-29"));
        assert!(!is_date("yesterday"));
    }

    #[test]
    fn test_playtime_grammar() {
        for ok in ["12h", "30m", "12h 30m", "12h30m", "0h"] {
            assert!(is_playtime(ok), "{}", ok);
        }
        for bad in ["", " ", "30m 12h", "12", "h", "1.5h", "12 h"] {
            assert!(!is_playtime(bad), "{}", bad);
        }
    }

    proptest! {
        #[test]
        fn prop_hours_and_minutes_accepted(h in 0u32..10_000, m in 0u32..60, gap in " {0,3}") {
            let hm = format!("{}h{}{}m", h, gap, m);
            let hours = format!("{}h", h);
            let minutes = format!("{}m", m);
            prop_assert!(is_playtime(&hm));
            prop_assert!(is_playtime(&hours));
            prop_assert!(is_playtime(&minutes));
        }
    }
}
