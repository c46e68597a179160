//! CLI module

mod commands;
mod output;

pub use commands::{Cli, Commands, apply_overrides};
pub use output::{
    write_outcomes_json, write_outcomes_text, write_signatures_json, write_signatures_text,
};
