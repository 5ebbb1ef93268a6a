//! `portal pmr` command implementation
//!
//! Triggers PMR ingestion for an inclusive date range.

use super::{run_trigger, CommandContext};
use crate::error::Result;
use crate::forms::{FormPage, PmrForm};

/// Trigger PMR ingestion for `from..=to`
pub async fn run(ctx: &CommandContext, from: String, to: String) -> Result<()> {
    run_trigger(ctx, FormPage::new(PmrForm::new(from, to))).await
}
