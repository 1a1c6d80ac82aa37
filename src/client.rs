//! Client for the ElevenLabs instant voice cloning endpoint.
//!
//! One blocking `POST /v1/voices/add` per request: scalar fields plus
//! every validated audio file in a single multipart body. No retries,
//! no partial success.

use crate::errors::{CloneError, CloneResult};
use crate::samples::{resolve_sample_base, validate_sample, AudioSample};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
const API_KEY_HEADER: &str = "xi-api-key";
const VOICES_ADD_PATH: &str = "/v1/voices/add";

/// Optional metadata labels for a cloned voice. Only the keys that are
/// set are serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoiceLabels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl VoiceLabels {
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.accent.is_none()
            && self.gender.is_none()
            && self.age.is_none()
    }
}

/// Inputs for one voice-clone upload.
#[derive(Debug, Clone, Default)]
pub struct VoiceCloneRequest {
    pub name: String,
    pub files: Vec<String>,
    /// Falls back to `ELEVENLABS_API_KEY` when unset.
    pub api_key: Option<String>,
    pub description: Option<String>,
    pub labels: Option<VoiceLabels>,
    pub remove_background_noise: bool,
    /// Base directory for relative input paths; defaults to a fixed
    /// directory under the user's home.
    pub sample_dir: Option<PathBuf>,
}

impl VoiceCloneRequest {
    pub fn new(name: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            name: name.into(),
            files,
            ..Self::default()
        }
    }
}

/// The upstream's view of the created voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceCloneResponse {
    pub voice_id: String,
    #[serde(default)]
    pub requires_verification: bool,
}

#[derive(Debug, Clone)]
pub struct CloneClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for CloneClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            timeout_secs: 120,
        }
    }
}

impl CloneClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Blocking client for the voice-upload endpoint.
pub struct VoiceCloner {
    client: Client,
    config: CloneClientConfig,
}

impl VoiceCloner {
    pub fn new(config: CloneClientConfig) -> CloneResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn with_default_config() -> CloneResult<Self> {
        Self::new(CloneClientConfig::default())
    }

    fn add_url(&self) -> String {
        format!("{}{}", self.config.base_url, VOICES_ADD_PATH)
    }

    /// Validates every input file, then uploads all of them as one
    /// multipart request. Any validation or transport failure aborts
    /// the whole operation before or at the single network call.
    pub fn clone_voice(&self, req: &VoiceCloneRequest) -> CloneResult<VoiceCloneResponse> {
        let api_key = resolve_api_key(req.api_key.as_deref())?;
        let base = resolve_sample_base(req.sample_dir.as_deref())?;

        let mut samples = Vec::with_capacity(req.files.len());
        for file in &req.files {
            let sample = validate_sample(file, &base)?;
            tracing::debug!(
                path = %sample.path.display(),
                mime = sample.mime,
                size = sample.size,
                "validated sample"
            );
            samples.push(sample);
        }

        // The form owns the open file handles; they are released when
        // it drops, on success and on every error path.
        let form = build_form(req, &samples)?;

        tracing::debug!(url = %self.add_url(), files = samples.len(), "uploading voice clone request");
        let response = self
            .client
            .post(self.add_url())
            .header(API_KEY_HEADER, api_key.as_str())
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CloneError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: VoiceCloneResponse = response.json()?;
        tracing::info!(
            voice_id = %result.voice_id,
            requires_verification = result.requires_verification,
            "voice created"
        );
        Ok(result)
    }
}

/// One-shot upload with the default endpoint configuration.
pub fn clone_voice(req: &VoiceCloneRequest) -> CloneResult<VoiceCloneResponse> {
    VoiceCloner::with_default_config()?.clone_voice(req)
}

pub(crate) fn resolve_api_key(explicit: Option<&str>) -> CloneResult<String> {
    match explicit {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(CloneError::MissingApiKey),
    }
}

fn build_form(req: &VoiceCloneRequest, samples: &[AudioSample]) -> CloneResult<Form> {
    let mut form = Form::new()
        .text("name", req.name.clone())
        .text(
            "remove_background_noise",
            req.remove_background_noise.to_string(),
        );
    if let Some(description) = &req.description {
        form = form.text("description", description.clone());
    }
    if let Some(labels) = req.labels.as_ref().filter(|labels| !labels.is_empty()) {
        form = form.text("labels", serde_json::to_string(labels)?);
    }
    for sample in samples {
        let file = File::open(&sample.path)?;
        let part = Part::reader(file)
            .file_name(sample.file_name.clone())
            .mime_str(sample.mime)?;
        form = form.part("files", part);
    }
    Ok(form)
}
