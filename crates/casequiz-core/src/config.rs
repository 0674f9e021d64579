//! Tool configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured catalog path.
pub const CATALOG_ENV: &str = "CASEQUIZ_CATALOG";

/// Top-level casequiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasequizConfig {
    /// Catalog file or directory to use instead of the built-in cases.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Where attempt reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Print the explanation after each graded answer.
    #[serde(default = "default_true")]
    pub show_explanations: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./casequiz-results")
}

fn default_true() -> bool {
    true
}

impl Default for CasequizConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            output_dir: default_output_dir(),
            show_explanations: true,
        }
    }
}

/// Expand `${VAR}` references in one left-to-right pass.
///
/// Substituted values are copied verbatim and never rescanned, so a value
/// that itself contains `${...}` stays literal. Unset variables expand to
/// an empty string; an unterminated `${` is kept as written.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without an explicit path:
/// 1. `casequiz.toml` in the current directory
/// 2. `~/.config/casequiz/config.toml`
///
/// `CASEQUIZ_CATALOG` overrides the catalog path.
pub fn load_config_from(path: Option<&Path>) -> Result<CasequizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("casequiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<CasequizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            config
        }
        None => CasequizConfig::default(),
    };

    if let Ok(catalog) = std::env::var(CATALOG_ENV) {
        if !catalog.trim().is_empty() {
            config.catalog = Some(PathBuf::from(catalog));
        }
    }

    config.catalog = config.catalog.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("casequiz"))
}
