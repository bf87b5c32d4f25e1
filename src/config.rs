use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::{PublishVersionError, Result};

/// Public npm registry root, used when nothing else is configured.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Project-level tool configuration file name.
pub const CONFIG_FILE_NAME: &str = "publishversion.toml";

/// npm client configuration file read from the project directory.
pub const NPMRC_FILE_NAME: &str = ".npmrc";

/// Represents the complete configuration for publish-version.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

/// Registry settings that can live in the tool configuration file.
///
/// `NPM_REGISTRY`, the `--registry` flag and a project `.npmrc` take
/// precedence over `url`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RegistryConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Location of the package manifest, relative to the project directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: String,
}

fn default_manifest_path() -> String {
    "package.json".to_string()
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `publishversion.toml` in `project_dir`
/// 3. `.publishversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Errors
/// * `Configuration` - if a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, project_dir: &Path) -> Result<Config> {
    let local = project_dir.join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        PublishVersionError::configuration(format!(
            "Could not read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&config_str).map_err(|e| {
        PublishVersionError::configuration(format!(
            "Could not parse config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Extracts the `registry=` value from `.npmrc` contents.
///
/// Lines are trimmed and blank lines skipped; the last `registry=` line wins.
/// Scoped entries such as `@acme:registry=` are not matched.
pub fn parse_npmrc_registry(contents: &str) -> Option<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.strip_prefix("registry="))
        .last()
        .map(str::to_string)
}

/// Reads the registry from `<project_dir>/.npmrc`.
///
/// A missing or unreadable file is not an error.
pub fn read_npmrc_registry(project_dir: &Path) -> Option<String> {
    let path = project_dir.join(NPMRC_FILE_NAME);
    match fs::read_to_string(&path) {
        Ok(contents) => parse_npmrc_registry(&contents),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no usable .npmrc");
            None
        }
    }
}

/// Normalizes a configured registry URL.
///
/// A leading `/` (protocol-relative form, e.g. `//npm.acme.dev/`) is expanded
/// to `https:` + the rest, and one trailing `/` is stripped.
pub fn normalize_registry_url(raw: &str) -> String {
    let mut url = if raw.starts_with('/') {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    };
    if url.ends_with('/') {
        url.pop();
    }
    url
}

/// Raw registry inputs gathered by the binary, highest precedence first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySources {
    /// `--registry` flag or `NPM_REGISTRY`
    pub explicit: Option<String>,
    /// `registry=` from the project `.npmrc`
    pub npmrc: Option<String>,
    /// `[registry] url` from the tool config file
    pub config_file: Option<String>,
    /// `--token` flag or `NPM_TOKEN`
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved settings handed to the registry client.
#[derive(Clone, PartialEq)]
pub struct RegistrySettings {
    pub url: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        RegistrySettings {
            url: DEFAULT_REGISTRY.to_string(),
            token: None,
            timeout: None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolves the registry URL and credential from explicit sources.
///
/// Empty values count as unset. The first non-empty URL among `explicit`,
/// `npmrc` and `config_file` is used, falling back to [DEFAULT_REGISTRY],
/// then normalized with [normalize_registry_url].
pub fn resolve_registry_settings(sources: RegistrySources) -> RegistrySettings {
    let url = non_empty(sources.explicit)
        .or_else(|| non_empty(sources.npmrc))
        .or_else(|| non_empty(sources.config_file))
        .unwrap_or_else(|| DEFAULT_REGISTRY.to_string());

    RegistrySettings {
        url: normalize_registry_url(&url),
        token: non_empty(sources.token),
        timeout: sources.timeout_secs.map(Duration::from_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_protocol_relative() {
        assert_eq!(
            normalize_registry_url("//npm.acme.dev/"),
            "https://npm.acme.dev"
        );
    }

    #[test]
    fn test_normalize_strips_single_trailing_slash() {
        assert_eq!(
            normalize_registry_url("https://registry.npmjs.org/"),
            "https://registry.npmjs.org"
        );
        assert_eq!(
            normalize_registry_url("https://npm.acme.dev//"),
            "https://npm.acme.dev/"
        );
        assert_eq!(
            normalize_registry_url("https://npm.acme.dev"),
            "https://npm.acme.dev"
        );
    }

    #[test]
    fn test_parse_npmrc_registry_last_wins() {
        let npmrc = "\n  registry=https://first.example/\n@acme:registry=https://scoped.example\nregistry=https://second.example/\nalways-auth=true\n";
        assert_eq!(
            parse_npmrc_registry(npmrc),
            Some("https://second.example/".to_string())
        );
    }

    #[test]
    fn test_parse_npmrc_without_registry() {
        assert_eq!(parse_npmrc_registry("save-exact=true\n"), None);
        assert_eq!(parse_npmrc_registry(""), None);
    }

    #[test]
    fn test_read_npmrc_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_npmrc_registry(dir.path()), None);
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = resolve_registry_settings(RegistrySources::default());
        assert_eq!(settings, RegistrySettings::default());
        assert_eq!(settings.url, DEFAULT_REGISTRY);
    }

    #[test]
    fn test_resolve_precedence() {
        let sources = RegistrySources {
            explicit: None,
            npmrc: Some("//npm.acme.dev/".to_string()),
            config_file: Some("https://from-config.example".to_string()),
            token: Some("secret".to_string()),
            timeout_secs: Some(10),
        };
        let settings = resolve_registry_settings(sources.clone());
        assert_eq!(settings.url, "https://npm.acme.dev");
        assert_eq!(settings.token.as_deref(), Some("secret"));
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));

        let explicit = RegistrySources {
            explicit: Some("https://explicit.example/".to_string()),
            ..sources
        };
        assert_eq!(
            resolve_registry_settings(explicit).url,
            "https://explicit.example"
        );
    }

    #[test]
    fn test_resolve_treats_empty_as_unset() {
        let settings = resolve_registry_settings(RegistrySources {
            explicit: Some(String::new()),
            token: Some(String::new()),
            ..RegistrySources::default()
        });
        assert_eq!(settings.url, DEFAULT_REGISTRY);
        assert_eq!(settings.token, None);
    }

    #[test]
    fn test_settings_debug_redacts_token() {
        let settings = RegistrySettings {
            token: Some("npm_abcdef".to_string()),
            ..RegistrySettings::default()
        };
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("npm_abcdef"));
        assert!(rendered.contains("<redacted>"));
    }
}
