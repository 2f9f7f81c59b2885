use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::auth;
use crate::error::WorkflowError;

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com/automation/v4/workflows";
pub const BASE_URL_VAR: &str = "HUBSPOT_API_BASE";
const USER_AGENT: &str = concat!("hubspot-workflows-cli/", env!("CARGO_PKG_VERSION"));
/// Hosts that may be reached over plain http.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Characters that must be percent-encoded in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b'%').add(b'/').add(b'?');

fn encode_path(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

/// The bearer token rides on every request, so anything other than a local
/// mock must be https.
fn validate_base_url(base: &str) -> Result<(), WorkflowError> {
    let parsed = Url::parse(base).map_err(|e| {
        WorkflowError::Config(format!("invalid {BASE_URL_VAR} URL '{base}': {e}"))
    })?;

    let host = parsed
        .host_str()
        .ok_or_else(|| WorkflowError::Config(format!("{BASE_URL_VAR} must include a host")))?;

    let scheme = parsed.scheme();
    if scheme != "https" && scheme != "http" {
        return Err(WorkflowError::Config(format!(
            "{BASE_URL_VAR} must be an http(s) URL, got '{scheme}://'"
        )));
    }

    let is_local = LOCALHOST_DOMAINS
        .iter()
        .any(|&local| host.eq_ignore_ascii_case(local));
    if !is_local && scheme != "https" {
        return Err(WorkflowError::Config(format!(
            "{BASE_URL_VAR} must use https for non-localhost host '{host}'"
        )));
    }
    Ok(())
}

/// Everything a request needs to reach the workflows collection.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    bearer: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("bearer", &"[redacted]")
            .finish()
    }
}

impl ClientConfig {
    pub fn new(token: &str, base_url: &str) -> Result<Self, WorkflowError> {
        if token.is_empty() {
            return Err(WorkflowError::MissingCredential);
        }
        let base_url = base_url.trim().trim_end_matches('/');
        validate_base_url(base_url)?;
        Ok(Self {
            base_url: base_url.to_string(),
            bearer: format!("Bearer {token}"),
        })
    }

    /// The credential is checked before the base URL so a missing key always
    /// wins over other configuration problems.
    pub fn from_env_with(
        env_var: impl Fn(&str) -> Result<String, std::env::VarError>,
    ) -> Result<Self, WorkflowError> {
        let token = auth::resolve_token_with(&env_var)?;
        let base_url = match env_var(BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_BASE_URL.to_string(),
        };
        Self::new(&token, &base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn item_url(&self, workflow_id: &str) -> String {
        format!("{}/{}", self.base_url, encode_path(workflow_id))
    }

    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", self.bearer.clone()),
            ("Content-Type", "application/json".to_string()),
            ("Accept", "application/json".to_string()),
            ("User-Agent", USER_AGENT.to_string()),
        ]
    }
}
