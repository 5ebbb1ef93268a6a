//! `portal pos` command implementation
//!
//! Triggers POS ingestion from a start date.

use super::{run_trigger, CommandContext};
use crate::error::Result;
use crate::forms::{FormPage, PosForm};

/// Trigger POS ingestion starting at `since` (inclusive)
pub async fn run(ctx: &CommandContext, since: String) -> Result<()> {
    run_trigger(ctx, FormPage::new(PosForm::new(since))).await
}
