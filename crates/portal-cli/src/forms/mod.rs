//! Form pages
//!
//! A page is a set of fields ([`PageForm`]) plus one [`PageState`]. The
//! [`FormPage`] wrapper drives the shared lifecycle:
//!
//! ```text
//! Idle -> Validating -> Invalid(issues)
//!                    -> Submitting -> Succeeded(payload) | Failed(message)
//! ```
//!
//! Every attempt starts from a reset state. Validation failures never reach
//! the network.

pub mod iri;
pub mod new_table;
pub mod pmr;
pub mod pos;

pub use iri::{IriForm, IriKind};
pub use new_table::NewTableForm;
pub use pmr::PmrForm;
pub use pos::PosForm;

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use crate::upload::{ExtraFields, SelectedFile, UploadComponent, UploadConfig, UploadResult};
use portal_common::ValidationIssue;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// One readiness predicate, rendered as a pass/fail dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub ok: bool,
}

impl ChecklistItem {
    pub fn new(label: &'static str, ok: bool) -> Self {
        Self { label, ok }
    }
}

/// Where a page is in its submit lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageState {
    #[default]
    Idle,
    Validating,
    /// Validation failed; nothing was sent
    Invalid(Vec<ValidationIssue>),
    Submitting,
    Succeeded(Value),
    Failed(String),
}

impl PageState {
    /// Success payload, or the error the page would display
    pub fn outcome(&self) -> Result<&Value> {
        match self {
            PageState::Succeeded(payload) => Ok(payload),
            PageState::Invalid(issues) => Err(CliError::Validation(issues.clone())),
            PageState::Failed(message) => Err(CliError::Submission(message.clone())),
            PageState::Idle | PageState::Validating | PageState::Submitting => {
                Err(CliError::Submission("No submission has completed.".to_string()))
            },
        }
    }
}

/// Field set and endpoints of one page
pub trait PageForm {
    /// Page title, e.g. `IRI · Category-Brand`
    fn title(&self) -> &'static str;

    /// Current problems, in display order; empty means ready
    fn issues(&self) -> Vec<ValidationIssue>;

    /// Readiness predicates for display
    fn checklist(&self) -> Vec<ChecklistItem>;

    /// JSON trigger endpoint
    fn endpoint(&self) -> &'static str;

    /// JSON trigger body
    fn body(&self) -> Result<Value>;

    /// Upload component configuration, if the page accepts files
    fn upload_config(&self) -> Option<UploadConfig> {
        None
    }

    /// Auxiliary multipart fields sent with an upload
    fn upload_fields(&self) -> Result<ExtraFields> {
        Ok(ExtraFields::new())
    }

    /// Reset every field to its initial value
    fn clear(&mut self);
}

/// A form plus its lifecycle state and optional upload component
#[derive(Debug)]
pub struct FormPage<F: PageForm> {
    form: F,
    state: PageState,
    upload: Option<UploadComponent>,
}

impl<F: PageForm> FormPage<F> {
    pub fn new(form: F) -> Self {
        let upload = form.upload_config().map(UploadComponent::new);
        Self {
            form,
            state: PageState::Idle,
            upload,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn upload_component(&self) -> Option<&UploadComponent> {
        self.upload.as_ref()
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        self.form.issues()
    }

    pub fn checklist(&self) -> Vec<ChecklistItem> {
        self.form.checklist()
    }

    /// Validate and post the JSON trigger body
    pub async fn trigger(&mut self, client: &ApiClient) -> &PageState {
        if !self.validate() {
            return &self.state;
        }

        self.state = PageState::Submitting;
        let endpoint = self.form.endpoint();
        info!(page = self.form.title(), endpoint, "Triggering processing");

        let outcome = match self.form.body() {
            Ok(body) => client.post_json(endpoint, &body).await,
            Err(e) => Err(e),
        };

        self.state = match outcome {
            Ok(payload) => PageState::Succeeded(payload),
            Err(e) => PageState::Failed(e.to_string()),
        };
        &self.state
    }

    /// Validate, select `files` on the page's upload component and submit them
    pub async fn upload(&mut self, client: &ApiClient, files: Vec<SelectedFile>) -> &PageState {
        if !self.validate() {
            return &self.state;
        }

        let selected = match self.upload.as_mut() {
            Some(upload) => upload.select_files(files).map(|_| ()),
            None => Err(CliError::NoEndpoint),
        };
        self.submit_selection(client, selected).await
    }

    /// Like [`upload`](Self::upload), stating local paths only once the
    /// fields are valid
    pub async fn upload_paths<P: AsRef<Path>>(&mut self, client: &ApiClient, paths: &[P]) -> &PageState {
        if !self.validate() {
            return &self.state;
        }

        let selected = match self.upload.as_mut() {
            Some(upload) => upload.select_paths(paths).map(|_| ()),
            None => Err(CliError::NoEndpoint),
        };
        self.submit_selection(client, selected).await
    }

    /// Clear fields, selection and state
    pub fn reset(&mut self) {
        self.form.clear();
        if let Some(upload) = self.upload.as_mut() {
            upload.clear_selection();
        }
        self.state = PageState::Idle;
    }

    async fn submit_selection(&mut self, client: &ApiClient, selected: Result<()>) -> &PageState {
        if let Err(e) = selected {
            self.state = PageState::Failed(e.to_string());
            return &self.state;
        }

        let extra = match self.form.upload_fields() {
            Ok(extra) => extra,
            Err(e) => {
                self.state = PageState::Failed(e.to_string());
                return &self.state;
            },
        };

        let Some(upload) = self.upload.as_mut() else {
            self.state = PageState::Failed(CliError::NoEndpoint.to_string());
            return &self.state;
        };

        self.state = PageState::Submitting;
        self.state = match upload.submit(client, &extra).await {
            UploadResult::Success(payload) => PageState::Succeeded(payload),
            UploadResult::Failure(message) => PageState::Failed(message),
        };
        &self.state
    }

    fn validate(&mut self) -> bool {
        self.state = PageState::Validating;

        let issues = self.form.issues();
        if issues.is_empty() {
            return true;
        }

        debug!(page = self.form.title(), issues = issues.len(), "Validation failed");
        self.state = PageState::Invalid(issues);
        false
    }
}
