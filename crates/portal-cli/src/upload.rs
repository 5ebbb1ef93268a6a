//! Generic file upload component
//!
//! [`UploadComponent`] owns a local file selection, guards it with the
//! configured count, size and type constraints, and submits it as one
//! multipart POST together with auxiliary text fields.
//!
//! Selection is all-or-nothing: a rejected selection leaves the previous one
//! untouched. Submission never returns an error to the caller; every failure
//! (missing endpoint, empty selection, transport error, bad status) ends up as
//! [`UploadResult::Failure`] with a user-facing message.
//!
//! # Example
//!
//! ```no_run
//! use portal_cli::api::ApiClient;
//! use portal_cli::upload::{ExtraFields, SelectedFile, UploadComponent, UploadConfig};
//! use std::time::Duration;
//!
//! # async fn demo() -> portal_cli::Result<()> {
//! let client = ApiClient::new("http://127.0.0.1:5001", Duration::from_secs(30))?;
//! let mut upload = UploadComponent::new(
//!     UploadConfig::single("/api/upload/new-table")
//!         .with_max_size_mb(100)
//!         .with_accept(&[".csv", ".xlsx"]),
//! );
//!
//! upload.select_files(vec![SelectedFile::from_path("rows.csv")?])?;
//!
//! let mut extra = ExtraFields::new();
//! extra.insert("table".into(), "sales_items".into());
//! let result = upload.submit(&client, &extra).await;
//! println!("{:?}", result);
//! # Ok(())
//! # }
//! ```

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// MIME type of `.xlsx` workbooks
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Auxiliary form fields sent next to the files
///
/// Values are coerced to strings on the wire; `null` values are skipped.
pub type ExtraFields = BTreeMap<String, Value>;

/// A local file chosen for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name sent in the multipart part
    pub name: String,
    pub size_bytes: u64,
    pub mime_hint: Option<String>,
    /// Where the content is read from at submission time
    pub path: PathBuf,
}

impl SelectedFile {
    /// Stat a local file and describe it
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|_| CliError::FileNotFound(path.display().to_string()))?;

        if !metadata.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_hint: guess_mime(path),
            path: path.to_path_buf(),
        })
    }

    /// Lowercased extension including the dot, e.g. `.xlsx`
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
    }
}

fn guess_mime(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    let mime = match ext.as_str() {
        "csv" => mime::TEXT_CSV.to_string(),
        "json" => mime::APPLICATION_JSON.to_string(),
        "txt" => mime::TEXT_PLAIN.to_string(),
        "xlsx" => XLSX_MIME.to_string(),
        "xls" => "application/vnd.ms-excel".to_string(),
        _ => return None,
    };
    Some(mime)
}

/// Static configuration of an upload component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Endpoint path or absolute URL; `None` disables submission
    pub endpoint: Option<String>,
    /// Multipart field name the files are appended under
    pub field_name: String,
    /// Whether more than one file may be selected
    pub multiple: bool,
    /// Per-file size limit in megabytes
    pub max_size_mb: Option<u64>,
    /// Accepted extensions (`.xlsx`) or MIME patterns (`text/*`); empty accepts anything
    pub accept: Vec<String>,
}

impl UploadConfig {
    /// Single-file component posting under `file`
    pub fn single(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            field_name: "file".to_string(),
            multiple: false,
            max_size_mb: None,
            accept: Vec::new(),
        }
    }

    /// Multi-file component posting under `files`
    pub fn multiple(endpoint: impl Into<String>) -> Self {
        Self {
            field_name: "files".to_string(),
            multiple: true,
            ..Self::single(endpoint)
        }
    }

    pub fn without_endpoint(mut self) -> Self {
        self.endpoint = None;
        self
    }

    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    pub fn with_max_size_mb(mut self, mb: u64) -> Self {
        self.max_size_mb = Some(mb);
        self
    }

    pub fn with_accept(mut self, accept: &[&str]) -> Self {
        self.accept = accept.iter().map(|a| a.trim().to_lowercase()).collect();
        self
    }

    /// Accept list as shown to the user, e.g. `.csv,.xlsx`
    pub fn accept_label(&self) -> String {
        self.accept.join(",")
    }

    fn accepts(&self, file: &SelectedFile) -> bool {
        if self.accept.is_empty() {
            return true;
        }

        let extension = file.extension();
        self.accept.iter().any(|pattern| {
            if pattern.starts_with('.') {
                extension.as_deref() == Some(pattern.as_str())
            } else if let Some(prefix) = pattern.strip_suffix("/*") {
                file.mime_hint
                    .as_deref()
                    .is_some_and(|m| m.split('/').next() == Some(prefix))
            } else {
                file.mime_hint.as_deref() == Some(pattern.as_str())
            }
        })
    }
}

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    Success(Value),
    Failure(String),
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Success(_))
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            UploadResult::Success(payload) => Some(payload),
            UploadResult::Failure(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            UploadResult::Success(_) => None,
            UploadResult::Failure(message) => Some(message),
        }
    }
}

impl From<Result<Value>> for UploadResult {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(payload) => UploadResult::Success(payload),
            Err(e) => UploadResult::Failure(e.to_string()),
        }
    }
}

/// Everything one multipart POST needs, fixed at submission time
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub endpoint: String,
    pub field_name: String,
    pub files: Vec<SelectedFile>,
    /// Already coerced to strings, nulls removed
    pub extra_fields: Vec<(String, String)>,
}

impl UploadRequest {
    /// Build a request from a component's configuration and selection
    ///
    /// Fails without side effects when there is no endpoint or no file. A
    /// single-file configuration sends only the first file.
    pub fn new(config: &UploadConfig, files: &[SelectedFile], extra: &ExtraFields) -> Result<Self> {
        let endpoint = config.endpoint.clone().ok_or(CliError::NoEndpoint)?;

        if files.is_empty() {
            return Err(CliError::NoFileSelected);
        }

        let files = if config.multiple {
            files.to_vec()
        } else {
            files[..1].to_vec()
        };

        let extra_fields = extra
            .iter()
            .filter_map(|(key, value)| coerce_field(value).map(|v| (key.clone(), v)))
            .collect();

        Ok(Self {
            endpoint,
            field_name: config.field_name.clone(),
            files,
            extra_fields,
        })
    }

    /// Open the files and assemble the multipart body
    ///
    /// File contents are streamed into the request, not buffered.
    pub async fn into_form(self) -> Result<Form> {
        let mut form = Form::new();

        for file in self.files {
            let handle = tokio::fs::File::open(&file.path).await?;
            let length = handle.metadata().await?.len();
            let mut part = Part::stream_with_length(Body::from(handle), length).file_name(file.name);
            if let Some(mime) = file.mime_hint.as_deref() {
                part = part.mime_str(mime)?;
            }
            form = form.part(self.field_name.clone(), part);
        }

        for (key, value) in self.extra_fields {
            form = form.text(key, value);
        }

        Ok(form)
    }
}

/// String form of an auxiliary field, `None` for null
pub fn coerce_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Callbacks fired by [`UploadComponent`]; every method defaults to a no-op
pub trait UploadListener: Send + Sync {
    /// A selection was accepted
    fn on_selected(&self, _files: &[SelectedFile]) {}

    /// A submission succeeded
    fn on_uploaded(&self, _payload: &Value) {}

    /// A selection was rejected or a submission failed
    fn on_error(&self, _message: &str) {}
}

/// Listener that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl UploadListener for NoopListener {}

/// File selection plus multipart submission
pub struct UploadComponent {
    config: UploadConfig,
    selection: Vec<SelectedFile>,
    last_error: Option<String>,
    last_result: Option<UploadResult>,
    listener: Box<dyn UploadListener>,
}

impl std::fmt::Debug for UploadComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadComponent")
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("last_error", &self.last_error)
            .field("last_result", &self.last_result)
            .finish_non_exhaustive()
    }
}

impl UploadComponent {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config,
            selection: Vec::new(),
            last_error: None,
            last_result: None,
            listener: Box::new(NoopListener),
        }
    }

    /// Attach a listener for selection and submission events
    pub fn with_listener(mut self, listener: impl UploadListener + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Currently selected files, in selection order
    pub fn selection(&self) -> &[SelectedFile] {
        &self.selection
    }

    /// Message of the last rejected selection or failed submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Result of the last submission attempt
    pub fn last_result(&self) -> Option<&UploadResult> {
        self.last_result.as_ref()
    }

    /// Replace the selection with `files` if they all pass the guards
    pub fn select_files(&mut self, files: Vec<SelectedFile>) -> Result<&[SelectedFile]> {
        if let Err(e) = self.check_selection(&files) {
            return Err(self.reject(e));
        }

        debug!(
            count = files.len(),
            names = ?files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            "Selection accepted"
        );

        self.last_error = None;
        self.selection = files;
        self.listener.on_selected(&self.selection);
        Ok(&self.selection)
    }

    /// Drag-and-drop entry point
    ///
    /// Identical to [`select_files`](Self::select_files) except that a
    /// single-file component rejects a multi-file drop before looking at the
    /// files themselves.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) -> Result<&[SelectedFile]> {
        if !self.config.multiple && files.len() > 1 {
            return Err(self.reject(CliError::TooManyFiles));
        }
        self.select_files(files)
    }

    /// Stat local paths and select them
    pub fn select_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<&[SelectedFile]> {
        let files = match paths.iter().map(SelectedFile::from_path).collect::<Result<Vec<_>>>() {
            Ok(files) => files,
            Err(e) => return Err(self.reject(e)),
        };
        self.select_files(files)
    }

    /// Forget the selection; no network involved
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.last_error = None;
    }

    /// Upload the selection with `extra` as auxiliary fields
    ///
    /// Exactly one POST per call when the guards pass, none otherwise. The
    /// previous result is cleared before the new attempt starts.
    pub async fn submit(&mut self, client: &ApiClient, extra: &ExtraFields) -> UploadResult {
        self.last_result = None;
        self.last_error = None;

        let outcome = match UploadRequest::new(&self.config, &self.selection, extra) {
            Ok(request) => Self::send(client, request).await,
            Err(e) => Err(e),
        };

        let result = UploadResult::from(outcome);
        match &result {
            UploadResult::Success(payload) => {
                info!(endpoint = ?self.config.endpoint, "Upload succeeded");
                self.listener.on_uploaded(payload);
            },
            UploadResult::Failure(message) => {
                warn!(endpoint = ?self.config.endpoint, error = %message, "Upload failed");
                self.last_error = Some(message.clone());
                self.listener.on_error(message);
            },
        }

        self.last_result = Some(result.clone());
        result
    }

    async fn send(client: &ApiClient, request: UploadRequest) -> Result<Value> {
        let endpoint = request.endpoint.clone();
        info!(
            endpoint = %endpoint,
            field = %request.field_name,
            files = request.files.len(),
            fields = request.extra_fields.len(),
            "Submitting upload"
        );

        let form = request.into_form().await?;
        client.post_multipart(&endpoint, form).await
    }

    fn check_selection(&self, files: &[SelectedFile]) -> Result<()> {
        if !self.config.multiple && files.len() > 1 {
            return Err(CliError::TooManyFiles);
        }

        if let Some(limit_mb) = self.config.max_size_mb {
            let limit_bytes = limit_mb.saturating_mul(BYTES_PER_MB);
            if let Some(too_big) = files.iter().find(|f| f.size_bytes > limit_bytes) {
                return Err(CliError::file_too_large(&too_big.name, limit_mb));
            }
        }

        if let Some(rejected) = files.iter().find(|f| !self.config.accepts(f)) {
            return Err(CliError::UnsupportedFileType {
                name: rejected.name.clone(),
                accept: self.config.accept_label(),
            });
        }

        Ok(())
    }

    fn reject(&mut self, error: CliError) -> CliError {
        let message = error.to_string();
        debug!(error = %message, "Selection rejected");
        self.last_error = Some(message.clone());
        self.listener.on_error(&message);
        error
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fake(name: &str, size_bytes: u64) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            size_bytes,
            mime_hint: guess_mime(Path::new(name)),
            path: PathBuf::from(name),
        }
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> SelectedFile {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        SelectedFile::from_path(&path).unwrap()
    }

    #[derive(Default, Clone)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl UploadListener for Recorder {
        fn on_selected(&self, files: &[SelectedFile]) {
            self.events.lock().unwrap().push(format!("selected:{}", files.len()));
        }

        fn on_uploaded(&self, _payload: &Value) {
            self.events.lock().unwrap().push("uploaded".to_string());
        }

        fn on_error(&self, message: &str) {
            self.events.lock().unwrap().push(format!("error:{}", message));
        }
    }

    #[test]
    fn test_oversized_file_keeps_previous_selection() {
        let recorder = Recorder::default();
        let mut upload = UploadComponent::new(UploadConfig::single("/up").with_max_size_mb(50))
            .with_listener(recorder.clone());

        upload.select_files(vec![fake("ok.xlsx", 1024)]).unwrap();
        let err = upload
            .select_files(vec![fake("huge.xlsx", 50 * BYTES_PER_MB + 1)])
            .unwrap_err();

        assert_eq!(err.to_string(), "File \"huge.xlsx\" exceeds 50 MB.");
        assert_eq!(upload.selection().len(), 1);
        assert_eq!(upload.selection()[0].name, "ok.xlsx");
        assert_eq!(upload.last_error(), Some("File \"huge.xlsx\" exceeds 50 MB."));

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.iter().filter(|e| e.starts_with("error:")).count(), 1);
    }

    #[test]
    fn test_exact_limit_is_allowed() {
        let mut upload = UploadComponent::new(UploadConfig::single("/up").with_max_size_mb(1));
        assert!(upload.select_files(vec![fake("edge.csv", BYTES_PER_MB)]).is_ok());
    }

    #[test]
    fn test_first_offending_file_is_named() {
        let mut upload = UploadComponent::new(UploadConfig::multiple("/up").with_max_size_mb(1));
        let err = upload
            .select_files(vec![
                fake("a.csv", 10),
                fake("b.csv", 2 * BYTES_PER_MB),
                fake("c.csv", 3 * BYTES_PER_MB),
            ])
            .unwrap_err();

        assert!(matches!(err, CliError::FileTooLarge { ref name, limit_mb: 1 } if name == "b.csv"));
        assert!(upload.selection().is_empty());
    }

    #[test]
    fn test_single_component_rejects_multi_drop() {
        let mut upload = UploadComponent::new(UploadConfig::single("/up"));
        let err = upload
            .drop_files(vec![fake("a.xlsx", 1), fake("b.xlsx", 1)])
            .unwrap_err();

        assert!(matches!(err, CliError::TooManyFiles));
        assert_eq!(upload.last_error(), Some("This field accepts only one file."));
        assert!(upload.selection().is_empty());
    }

    #[test]
    fn test_multiple_component_keeps_order() {
        let mut upload = UploadComponent::new(UploadConfig::multiple("/up"));
        let names: Vec<_> = upload
            .drop_files(vec![fake("z.csv", 1), fake("a.csv", 1)])
            .unwrap()
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(names, vec!["z.csv", "a.csv"]);
    }

    #[test]
    fn test_accept_list() {
        let mut upload = UploadComponent::new(UploadConfig::single("/up").with_accept(&[".csv", ".XLSX"]));
        assert!(upload.select_files(vec![fake("Rows.XLSX", 1)]).is_ok());

        let err = upload.select_files(vec![fake("notes.pdf", 1)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File \"notes.pdf\" is not an accepted type (.csv,.xlsx)."
        );
        assert_eq!(upload.selection()[0].name, "Rows.XLSX");

        let mut text_only = UploadComponent::new(UploadConfig::single("/up").with_accept(&["text/*"]));
        assert!(text_only.select_files(vec![fake("rows.csv", 1)]).is_ok());
    }

    #[test]
    fn test_select_paths_missing_file_keeps_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let rows = dir.path().join("rows.csv");
        std::fs::write(&rows, "id\n").unwrap();
        let missing = dir.path().join("gone.csv");

        let recorder = Recorder::default();
        let mut upload = UploadComponent::new(UploadConfig::single("/up")).with_listener(recorder.clone());
        assert_eq!(upload.select_paths(&[&rows]).unwrap()[0].name, "rows.csv");

        let err = upload.select_paths(&[&missing]).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
        assert_eq!(upload.last_error(), Some(err.to_string().as_str()));
        assert_eq!(upload.selection().len(), 1);
        assert_eq!(upload.selection()[0].name, "rows.csv");
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["selected:1".to_string(), format!("error:{}", err)]
        );
    }

    #[tokio::test]
    async fn test_form_streams_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_temp(&dir, "rows.csv", "qty\n1\n");
        let request = UploadRequest::new(&UploadConfig::single("/up"), &[file], &ExtraFields::new()).unwrap();
        assert!(request.into_form().await.is_ok());

        let gone = fake("gone.csv", 1);
        let request = UploadRequest::new(&UploadConfig::single("/up"), &[gone], &ExtraFields::new()).unwrap();
        assert!(request.into_form().await.is_err());
    }

    #[test]
    fn test_clear_selection() {
        let mut upload = UploadComponent::new(UploadConfig::single("/up"));
        upload.select_files(vec![fake("a.csv", 1)]).unwrap();
        upload.clear_selection();
        assert!(upload.selection().is_empty());
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_temp(&dir, "items.xlsx", "12345");
        assert_eq!(file.name, "items.xlsx");
        assert_eq!(file.size_bytes, 5);
        assert_eq!(file.mime_hint.as_deref(), Some(XLSX_MIME));

        assert!(matches!(
            SelectedFile::from_path(dir.path()),
            Err(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_request_coerces_fields_and_skips_null() {
        let mut extra = ExtraFields::new();
        extra.insert("source".into(), json!("Big Chain"));
        extra.insert("year".into(), json!(2025));
        extra.insert("draft".into(), json!(false));
        extra.insert("note".into(), Value::Null);

        let request = UploadRequest::new(
            &UploadConfig::single("/up"),
            &[fake("a.xlsx", 1), fake("b.xlsx", 1)],
            &extra,
        )
        .unwrap();

        assert_eq!(request.files.len(), 1);
        assert_eq!(
            request.extra_fields,
            vec![
                ("draft".to_string(), "false".to_string()),
                ("source".to_string(), "Big Chain".to_string()),
                ("year".to_string(), "2025".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_without_files_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let mut upload = UploadComponent::new(UploadConfig::single("/api/upload/new-table"));

        let result = upload.submit(&client, &ExtraFields::new()).await;
        assert_eq!(result, UploadResult::Failure("Please select a file first.".to_string()));
        assert_eq!(upload.last_result(), Some(&result));
    }

    #[tokio::test]
    async fn test_submit_without_endpoint() {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut upload = UploadComponent::new(UploadConfig::single("/up").without_endpoint());
        upload.select_files(vec![fake("a.csv", 1)]).unwrap();

        let result = upload.submit(&client, &ExtraFields::new()).await;
        assert_eq!(result.message(), Some("No upload endpoint configured."));
    }

    #[tokio::test]
    async fn test_submit_sends_multipart_and_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload/iri/category-brand"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .and(body_string_contains("name=\"file\"; filename=\"brands.xlsx\""))
            .and(body_string_contains("name=\"month\""))
            .and(body_string_contains("March"))
            .and(body_string_contains("brand-bytes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "rows": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = write_temp(&dir, "brands.xlsx", "brand-bytes");
        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let recorder = Recorder::default();
        let mut upload = UploadComponent::new(UploadConfig::single("/api/upload/iri/category-brand"))
            .with_listener(recorder.clone());
        upload.select_files(vec![file]).unwrap();

        let mut extra = ExtraFields::new();
        extra.insert("month".into(), json!("March"));

        let result = upload.submit(&client, &extra).await;
        assert_eq!(result.payload(), Some(&json!({"ok": true, "rows": 3})));
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["selected:1".to_string(), "uploaded".to_string()]
        );
    }

    #[tokio::test]
    async fn test_submit_multiple_files_under_plural_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload/iri/items"))
            .and(body_string_contains("name=\"files\"; filename=\"jan.xlsx\""))
            .and(body_string_contains("name=\"files\"; filename=\"feb.xlsx\""))
            .respond_with(ResponseTemplate::new(200).set_body_raw("queued", "text/plain"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_temp(&dir, "jan.xlsx", "1"), write_temp(&dir, "feb.xlsx", "2")];
        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let mut upload = UploadComponent::new(UploadConfig::multiple("/api/upload/iri/items"));
        upload.select_files(files).unwrap();

        let result = upload.submit(&client, &ExtraFields::new()).await;
        assert_eq!(result, UploadResult::Success(json!({"ok": true, "raw": "queued"})));
    }

    #[tokio::test]
    async fn test_submit_surfaces_status_and_excerpt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(413).set_body_string("file too large for server"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let mut upload = UploadComponent::new(UploadConfig::single("/up"));
        upload.select_files(vec![write_temp(&dir, "a.csv", "x")]).unwrap();

        let result = upload.submit(&client, &ExtraFields::new()).await;
        assert_eq!(
            result.message(),
            Some("HTTP 413 Payload Too Large: file too large for server")
        );
        assert_eq!(upload.last_error(), result.message());
    }

    #[tokio::test]
    async fn test_network_error_becomes_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let mut upload = UploadComponent::new(UploadConfig::single("/up"));
        upload.select_files(vec![write_temp(&dir, "a.csv", "x")]).unwrap();

        let result = upload.submit(&client, &ExtraFields::new()).await;
        assert!(result.message().unwrap().starts_with("Network request failed"));
    }
}
