//! Shared wire types for the intent parser boundary.
//!
//! The assistant front-end hands free text to an LLM and receives a JSON
//! record naming an action and its parameters. That collaborator is consumed
//! here as data only: this crate defines the record shape and the tolerant
//! parsing the raw model output needs (code-fence stripping, alias keys)
//! before anything downstream can dispatch on it.

mod intent;

pub use intent::{clean_json_block, Intent, IntentAction, IntentError};
