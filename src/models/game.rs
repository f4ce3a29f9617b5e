//! Catalog record types
//!
//! `GameDraft` is what callers submit; `GameRecord` is what is read back from
//! the table. Column order A..I is fixed by `COLUMN_COUNT` and `HEADER`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of record columns (A through I).
pub const COLUMN_COUNT: usize = 9;

/// Header row, occupying row 1 of the sheet.
pub const HEADER: [&str; COLUMN_COUNT] = [
    "Plataforma",
    "Nome",
    "Data de Lançamento",
    "Gênero",
    "Status",
    "Tempo",
    "Início",
    "Fim",
    "Nota",
];

/// First sheet row holding a record; row 1 is the header.
pub const FIRST_DATA_ROW: u32 = 2;

// == Status ==
/// Play status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "Não iniciado")]
    NotStarted,
    #[serde(rename = "Jogando")]
    Playing,
    #[serde(rename = "Pausado")]
    Paused,
    #[serde(rename = "Concluído")]
    Completed,
    #[serde(rename = "Dropado")]
    Dropped,
}

impl GameStatus {
    pub const ALL: [GameStatus; 5] = [
        GameStatus::NotStarted,
        GameStatus::Playing,
        GameStatus::Paused,
        GameStatus::Completed,
        GameStatus::Dropped,
    ];

    /// Label as stored in the sheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "Não iniciado",
            GameStatus::Playing => "Jogando",
            GameStatus::Paused => "Pausado",
            GameStatus::Completed => "Concluído",
            GameStatus::Dropped => "Dropado",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

// == Draft ==
/// A record as submitted for `add` or `update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDraft {
    #[serde(default)]
    pub plataforma: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub data_lancamento: Option<String>,
    #[serde(default)]
    pub genero: Option<String>,
    #[serde(default)]
    pub status: Option<GameStatus>,
    #[serde(default)]
    pub tempo: Option<String>,
    #[serde(default)]
    pub inicio: Option<String>,
    #[serde(default)]
    pub fim: Option<String>,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub nota: Option<f64>,
}

impl GameDraft {
    pub fn new(plataforma: impl Into<String>, nome: impl Into<String>) -> Self {
        Self {
            plataforma: plataforma.into(),
            nome: nome.into(),
            ..Self::default()
        }
    }

    /// The 9 cells in column order, with defaults for omitted fields.
    ///
    /// Status falls back to "Não iniciado"; every other optional field to "".
    pub fn to_row(&self) -> Vec<String> {
        fn cell(value: &Option<String>) -> String {
            value.as_deref().map(str::trim).unwrap_or_default().to_string()
        }

        vec![
            self.plataforma.trim().to_string(),
            self.nome.trim().to_string(),
            cell(&self.data_lancamento),
            cell(&self.genero),
            self.status.unwrap_or_default().as_str().to_string(),
            cell(&self.tempo),
            cell(&self.inicio),
            cell(&self.fim),
            self.nota.map(|n| n.to_string()).unwrap_or_default(),
        ]
    }
}

/// Accepts a number, a numeric string, an empty string or null.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Score {
        Number(f64),
        Text(String),
    }

    match Option::<Score>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Score::Number(n)) => Ok(Some(n)),
        Some(Score::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Score::Text(s)) => s
            .trim()
            .replace(',', ".")
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("nota is not a number: {}", s))),
    }
}

// == Record ==
/// A record read back from the table.
///
/// `id` is the sheet row number: data-range offset + 2. It is not stored and
/// shifts when an earlier row is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: u32,
    pub plataforma: String,
    pub nome: String,
    pub data_lancamento: String,
    pub genero: String,
    pub status: String,
    pub tempo: String,
    pub inicio: String,
    pub fim: String,
    pub nota: String,
}

impl GameRecord {
    /// Maps a data-range row to a record; missing trailing cells become "".
    pub fn from_row(offset: usize, row: &[String]) -> Self {
        let cell = |index: usize| row.get(index).cloned().unwrap_or_default();

        Self {
            id: id_for_offset(offset),
            plataforma: cell(0),
            nome: cell(1),
            data_lancamento: cell(2),
            genero: cell(3),
            status: cell(4),
            tempo: cell(5),
            inicio: cell(6),
            fim: cell(7),
            nota: cell(8),
        }
    }
}

/// Record id for a zero-based data-range offset.
pub fn id_for_offset(offset: usize) -> u32 {
    offset as u32 + FIRST_DATA_ROW
}

/// Zero-based data-range offset for a record id, if it can name a data row.
pub fn offset_for_id(id: u32) -> Option<usize> {
    id.checked_sub(FIRST_DATA_ROW).map(|offset| offset as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_id_offset_formula() {
        assert_eq!(id_for_offset(0), 2);
        assert_eq!(id_for_offset(7), 9);
        assert_eq!(offset_for_id(2), Some(0));
        assert_eq!(offset_for_id(9), Some(7));
        assert_eq!(offset_for_id(1), None);
        assert_eq!(offset_for_id(0), None);
    }

    #[test]
    fn test_from_row_pads_short_rows() {
        let record = GameRecord::from_row(1, &row(&["PC", "Hades"]));

        assert_eq!(record.id, 3);
        assert_eq!(record.plataforma, "PC");
        assert_eq!(record.nome, "Hades");
        assert_eq!(record.status, "");
        assert_eq!(record.nota, "");
    }

    #[test]
    fn test_to_row_fills_defaults() {
        let draft = GameDraft::new("PS5", "Astro Bot");

        assert_eq!(
            draft.to_row(),
            row(&["PS5", "Astro Bot", "", "", "Não iniciado", "", "", "", ""])
        );
    }

    #[test]
    fn test_to_row_keeps_given_fields() {
        let draft = GameDraft {
            data_lancamento: Some("2020-09-17".to_string()),
            genero: Some("Roguelike".to_string()),
            status: Some(GameStatus::Completed),
            tempo: Some("45h 30m".to_string()),
            nota: Some(9.5),
            ..GameDraft::new("PC", "Hades")
        };

        let cells = draft.to_row();
        assert_eq!(cells.len(), COLUMN_COUNT);
        assert_eq!(cells[2], "2020-09-17");
        assert_eq!(cells[4], "Concluído");
        assert_eq!(cells[5], "45h 30m");
        assert_eq!(cells[8], "9.5");
    }

    #[test]
    fn test_whole_score_has_no_fraction() {
        let draft = GameDraft {
            nota: Some(8.0),
            ..GameDraft::new("PC", "Celeste")
        };
        assert_eq!(draft.to_row()[8], "8");
    }

    #[test]
    fn test_draft_deserialize_camel_case() {
        let json = r#"{
            "plataforma": "Switch",
            "nome": "Zelda",
            "dataLancamento": "2023-05-12",
            "status": "Jogando",
            "nota": "7,5"
        }"#;
        let draft: GameDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.data_lancamento.as_deref(), Some("2023-05-12"));
        assert_eq!(draft.status, Some(GameStatus::Playing));
        assert_eq!(draft.nota, Some(7.5));
    }

    #[test]
    fn test_draft_empty_score_is_none() {
        let draft: GameDraft =
            serde_json::from_str(r#"{"plataforma":"PC","nome":"A","nota":""}"#).unwrap();
        assert_eq!(draft.nota, None);

        let draft: GameDraft =
            serde_json::from_str(r#"{"plataforma":"PC","nome":"A","nota":null}"#).unwrap();
        assert_eq!(draft.nota, None);
    }

    #[test]
    fn test_draft_rejects_unknown_status() {
        let result: Result<GameDraft, _> =
            serde_json::from_str(r#"{"plataforma":"PC","nome":"A","status":"Zerado"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_from_str_and_display() {
        for status in GameStatus::ALL {
            assert_eq!(status.to_string().parse::<GameStatus>(), Ok(status));
        }
        assert!("whatever".parse::<GameStatus>().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = GameRecord::from_row(0, &row(&["PC", "A", "2020-01-01"]));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 2);
        assert_eq!(json["dataLancamento"], "2020-01-01");
    }
}
