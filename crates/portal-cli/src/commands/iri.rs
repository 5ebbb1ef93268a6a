//! `portal iri` command implementation
//!
//! Uploads IRI workbooks, or triggers processing when no file is given.

use super::{run_trigger, run_upload, CommandContext};
use crate::error::Result;
use crate::forms::{FormPage, IriForm, IriKind};
use std::path::PathBuf;
use tracing::info;

/// Run an IRI page: upload `files` if any, otherwise trigger processing
pub async fn run(
    ctx: &CommandContext,
    kind: IriKind,
    source: String,
    year: String,
    month: String,
    files: Vec<PathBuf>,
) -> Result<()> {
    let page = FormPage::new(IriForm::with_fields(kind, source, year, month));

    if files.is_empty() {
        info!(kind = kind.as_str(), "No files given, triggering processing");
        run_trigger(ctx, page).await
    } else {
        run_upload(ctx, page, &files).await
    }
}
