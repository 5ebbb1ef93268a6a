//! CLI command implementations
//!
//! Each page command follows the same flow: check backend health (reported,
//! never blocking), show readiness, then trigger or upload and print the
//! outcome. A failed outcome is returned as an error so the process exits 1.

pub mod config;
pub mod iri;
pub mod ping;
pub mod pmr;
pub mod pos;
pub mod table;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::forms::{FormPage, PageForm, PageState};
use crate::health::{HealthMonitor, HealthStatus};
use crate::progress::with_spinner;
use crate::render;
use std::path::PathBuf;
use tracing::debug;

/// What every command needs: a client and the output mode
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub client: ApiClient,
    /// Print only the response payload as JSON
    pub json: bool,
}

impl CommandContext {
    pub fn new(config: &Config, json: bool) -> Result<Self> {
        Ok(Self {
            client: ApiClient::from_config(config)?,
            json,
        })
    }

    /// Ping the backend and show the status pill
    pub async fn report_health(&self) -> HealthStatus {
        let mut monitor = HealthMonitor::new();
        let status = monitor.check(&self.client).await;
        if !self.json {
            println!("{}", render::health_pill(status));
        }
        status
    }

    fn show_readiness<F: PageForm>(&self, page: &FormPage<F>) {
        if !self.json {
            println!();
            print!("{}", render::checklist(page.form().title(), &page.checklist()));
        }
    }

    fn finish(&self, state: &PageState) -> Result<()> {
        let payload = state.outcome()?;
        if self.json {
            println!("{}", render::response(payload));
        } else {
            println!();
            println!("Response:");
            println!("{}", render::response(payload));
        }
        Ok(())
    }
}

/// Post the page's JSON trigger body
pub(crate) async fn run_trigger<F: PageForm>(ctx: &CommandContext, mut page: FormPage<F>) -> Result<()> {
    ctx.report_health().await;
    ctx.show_readiness(&page);

    let title = page.form().title();
    let state = with_spinner(&format!("{}: processing…", title), page.trigger(&ctx.client)).await;
    debug!(page = title, state = ?state, "Trigger finished");

    ctx.finish(state)
}

/// Upload local files through the page's upload component
pub(crate) async fn run_upload<F: PageForm>(
    ctx: &CommandContext,
    mut page: FormPage<F>,
    paths: &[PathBuf],
) -> Result<()> {
    ctx.report_health().await;
    ctx.show_readiness(&page);

    let title = page.form().title();
    with_spinner(&format!("{}: uploading…", title), page.upload_paths(&ctx.client, paths)).await;
    debug!(page = title, state = ?page.state(), "Upload finished");

    let selection = page.upload_component().map(|u| u.selection()).unwrap_or_default();
    if !ctx.json && !selection.is_empty() {
        println!();
        println!("Selected:");
        println!("{}", render::selection(selection));
    }

    ctx.finish(page.state())
}
