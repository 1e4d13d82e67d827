//! # DIC Client
//!
//! Terminal client for the drug interaction checker.
//!
//! Contains:
//! - the REST API client (`api`)
//! - the drug selection (`selection`)
//! - debounced autocomplete that drops superseded responses (`autocomplete`)
//! - severity colours (`severity`) and terminal rendering (`render`)
//! - the static FAQ (`faq`)
//! - the interactive session tying them together (`session`)

pub mod api;
pub mod autocomplete;
pub mod error;
pub mod faq;
pub mod render;
pub mod selection;
pub mod session;
pub mod severity;

pub use api::{ApiClient, DEFAULT_API_URL};
pub use error::{ClientError, ClientResult};
pub use selection::Selection;
pub use session::CheckerSession;
