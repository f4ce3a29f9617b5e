//! Search Module
//!
//! Game database lookups authenticated with an OAuth client-credentials
//! token. Results are memoized in the shared cache; failures never are.
//!
//! A 401 from the search API is returned as-is: the token is not refreshed
//! automatically. Callers can `clear_token` and retry.

mod client;
mod token;

pub use client::{escape_query, search_body, SearchClient, SearchConfig, MAX_QUERY_LEN, RESULT_LIMIT};
pub use token::{AuthToken, TokenSlot};
