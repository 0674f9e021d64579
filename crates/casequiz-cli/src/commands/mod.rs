pub mod init;
pub mod list;
pub mod quiz;
pub mod review;
pub mod show;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use casequiz_core::config::{load_config_from, CasequizConfig};
use casequiz_core::repository::CaseRepository;

/// Load config, then the repository from `--catalog`, the configured
/// catalog, or the built-in cases, in that order.
pub fn open_repository(
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(CaseRepository, CasequizConfig)> {
    let config = load_config_from(config_path.as_deref())?;
    let repo = match catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => {
            tracing::debug!("using catalog {}", path.display());
            CaseRepository::load(path)?
        }
        None => {
            tracing::debug!("using built-in catalog");
            CaseRepository::builtin()?
        }
    };
    Ok((repo, config))
}
