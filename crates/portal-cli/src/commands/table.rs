//! `portal table` command implementation
//!
//! Creates a table from a column list and populates it from a file.

use super::{run_trigger, run_upload, CommandContext};
use crate::api::ColumnDef;
use crate::error::Result;
use crate::forms::{FormPage, NewTableForm};
use std::path::PathBuf;

fn build_form(table: String, columns: Vec<ColumnDef>, no_defaults: bool) -> NewTableForm {
    let mut form = if no_defaults {
        NewTableForm::with_columns(table, Vec::new())
    } else {
        NewTableForm::new(table)
    };
    for column in columns {
        form.add_column(column);
    }
    form
}

/// Create `table` with the default columns followed by `columns`
pub async fn create(
    ctx: &CommandContext,
    table: String,
    columns: Vec<ColumnDef>,
    no_defaults: bool,
) -> Result<()> {
    run_trigger(ctx, FormPage::new(build_form(table, columns, no_defaults))).await
}

/// Upload `file` to populate `table`, sending the schema alongside
pub async fn populate(
    ctx: &CommandContext,
    table: String,
    columns: Vec<ColumnDef>,
    no_defaults: bool,
    file: PathBuf,
) -> Result<()> {
    let page = FormPage::new(build_form(table, columns, no_defaults));
    run_upload(ctx, page, &[file]).await
}
