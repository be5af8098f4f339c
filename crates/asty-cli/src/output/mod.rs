//! Rendering of match results.
//!
//! Results are first converted into owned [`ResultRecord`] trees, which are
//! then written either as indented text or as JSON.

mod models;
mod render;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

pub(crate) use models::ResultRecord;
pub(crate) use render::{render_human, render_json};

/// Output format selection for match results.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub(crate) enum OutputFormat {
    /// One indented line per result.
    #[default]
    Human,
    /// A JSON array of result objects.
    Json,
}
