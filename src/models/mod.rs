//! Record schema, search results and HTTP response bodies.

pub mod game;
pub mod responses;
pub mod search;
pub mod validation;

// Re-export commonly used types
pub use game::{
    id_for_offset, offset_for_id, GameDraft, GameRecord, GameStatus, COLUMN_COUNT,
    FIRST_DATA_ROW, HEADER,
};
pub use responses::{HealthResponse, MessageResponse};
pub use search::GameSummary;
pub use validation::validate;
