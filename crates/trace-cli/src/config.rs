use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use trace_capture::geometry::CanvasSize;
use trace_client::client::DEFAULT_BASE_URL;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Overrides `api_base_url` when set.
pub const API_URL_ENV: &str = "TRACE_API_URL";

const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_base_url: String,
    /// Added in v1.
    pub canvas_width: f64,
    /// Added in v1.
    pub canvas_height: f64,
    /// Produce the random deviation/pressure stand-ins on every analysis.
    #[serde(default)]
    pub placeholder_scores: bool,
    pub created_at: jiff::Timestamp,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            placeholder_scores: false,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl TraceConfig {
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// The backend URL after applying the [`API_URL_ENV`] override.
    pub fn resolved_base_url(&self) -> String {
        resolve_base_url(&self.api_base_url, std::env::var(API_URL_ENV).ok())
    }

    /// Update one field from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> eyre::Result<()> {
        match key {
            "api_base_url" => {
                let url = value.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(eyre::eyre!("api_base_url must start with http:// or https://"));
                }
                self.api_base_url = url.trim_end_matches('/').to_string();
            }
            "canvas_width" => self.canvas_width = parse_dimension(key, value)?,
            "canvas_height" => self.canvas_height = parse_dimension(key, value)?,
            "placeholder_scores" => {
                self.placeholder_scores = value
                    .trim()
                    .parse()
                    .map_err(|_| eyre::eyre!("placeholder_scores must be true or false"))?;
            }
            other => return Err(eyre::eyre!("unknown config key: {other}")),
        }
        Ok(())
    }
}

fn parse_dimension(key: &str, value: &str) -> eyre::Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|e| eyre::eyre!("{key} must be a number: {e}"))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(eyre::eyre!("{key} must be a positive number"));
    }
    Ok(parsed)
}

fn resolve_base_url(configured: &str, env_override: Option<String>) -> String {
    env_override
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("trace"))
}

pub fn default_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, falling back to defaults when none exists yet.
pub fn load_or_default(path: &Path) -> eyre::Result<TraceConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(TraceConfig::default());
    }
    load(path)
}

pub fn load(path: &Path) -> eyre::Result<TraceConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: TraceConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update trace."
        ));
    }

    // v0 → v1: canvas size became configurable
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("canvas_width")
            .or_insert(serde_json::json!(DEFAULT_CANVAS_WIDTH));
        obj.entry("canvas_height")
            .or_insert(serde_json::json!(DEFAULT_CANVAS_HEIGHT));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added canvas size)");
    }

    Ok(json)
}

pub fn save(path: &Path, config: &TraceConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete(path: &Path) -> eyre::Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}
