//! Command handlers for the CLI
//!
//! Each subcommand has its own module; shared helpers live in `utils`.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

mod completions;
mod samples;
mod schema;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use samples::handle_samples;
pub use schema::handle_schema;
pub use validate::handle_validate;
