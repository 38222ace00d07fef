//! Commands Layer
//!
//! Handlers that bridge the presentation layer to the workflow, the store
//! and the catalog. Errors cross this boundary as plain strings.

mod workflow_cmd;
mod list_cmd;
mod catalog_cmd;
mod request;

pub use workflow_cmd::*;
pub use list_cmd::*;
pub use catalog_cmd::*;
pub use request::{handle_line, handle_request, Request, Response};
