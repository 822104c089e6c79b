//! Configuration for tagreport
//!
//! Looked up in order: an explicit `--config` path, `$TAGREPORT_CONFIG`,
//! `./tagreport.toml`, then `<config dir>/tagreport/config.toml`. When no
//! file is found the built-in defaults apply.

pub mod types;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bail_invalid;
use crate::error::{Result, TagReportError};
use crate::options::ComposeOverrides;

pub use types::{ColumnsConfig, ExportConfig, ReportConfig, TagReportConfig};

pub const CONFIG_ENV_VAR: &str = "TAGREPORT_CONFIG";
const LOCAL_CONFIG_FILE: &str = "tagreport.toml";
const CONFIG_DIR: &str = "tagreport";
const CONFIG_FILE: &str = "config.toml";

impl TagReportConfig {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TagReportError::io_operation("read config", path.display(), e))?;
        let config: TagReportConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Find and load the active configuration
    ///
    /// Returns the defaults, and no path, when nothing is found. An explicit
    /// path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(TagReportError::not_found("config file", path.display()));
            }
        }

        let cwd = std::env::current_dir()?;
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match locate(explicit, from_env, &cwd, dirs::config_dir()) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Ok((Self::load(&path)?, Some(path)))
            }
            None => {
                debug!("no config file found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    /// Reject values the composer cannot use
    pub fn validate(&self) -> Result<()> {
        if self.report.uncategorized_title.trim().is_empty() {
            bail_invalid!("report.uncategorized_title", "empty title");
        }

        let mut seen = HashSet::new();
        for column in &self.columns.static_columns {
            if column.key.is_empty() {
                bail_invalid!("columns.static key", "empty key");
            }
            if !seen.insert(column.key.as_str()) {
                bail_invalid!("columns.static key", format!("duplicate key '{}'", column.key));
            }
        }
        Ok(())
    }

    /// Compose defaults drawn from this configuration
    pub fn to_overrides(&self) -> ComposeOverrides {
        ComposeOverrides {
            variant: None,
            include_sub_column: None,
            default_variant: self.report.variant,
            default_include_sub_column: self.report.include_sub_column,
            uncategorized_title: self.report.uncategorized_title.clone(),
            static_columns: self.columns.static_columns.clone(),
            flags: (&self.export).into(),
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TagReportError::Other(format!("failed to serialize config: {}", e)))
    }
}

/// First existing candidate path, explicit path first
fn locate(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    cwd: &Path,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|path| path.exists()) {
        return Some(path);
    }

    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    config_dir
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ExportFlags, StaticColumn};
    use crate::report::StructureVariant;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TagReportConfig::default();
        assert_eq!(config.report.variant, StructureVariant::SectorFirst);
        assert!(!config.report.include_sub_column);
        assert_eq!(config.report.uncategorized_title, "Uncategorized");
        assert_eq!(ExportFlags::from(&config.export), ExportFlags::default());
        assert!(config.columns.static_columns.is_empty());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tagreport.toml");
        fs::write(
            &path,
            r#"
[report]
variant = "rowFirst"

[export]
show_groups = true

[[columns.static]]
key = "lead_title"
title = "Source Title"
"#,
        )
        .unwrap();

        let config = TagReportConfig::load(&path).unwrap();
        assert_eq!(config.report.variant, StructureVariant::DimensionFirst);
        assert_eq!(config.report.uncategorized_title, "Uncategorized");
        assert!(config.export.show_groups);
        assert!(config.export.show_lead_entry_id);
        assert_eq!(
            config.columns.static_columns,
            vec![StaticColumn {
                key: "lead_title".to_string(),
                title: "Source Title".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tagreport.toml");
        fs::write(&path, "[report]\norientation = \"rowFirst\"\n").unwrap();

        let err = TagReportConfig::load(&path).unwrap_err();
        assert!(matches!(err, TagReportError::Toml(_)));
    }

    #[test]
    fn test_duplicate_static_column_rejected() {
        let mut config = TagReportConfig::default();
        let column = StaticColumn {
            key: "entry_id".to_string(),
            title: "Entry Id".to_string(),
        };
        config.columns.static_columns = vec![column.clone(), column];

        let err = config.validate().unwrap_err();
        assert!(matches!(err, TagReportError::InvalidValue { .. }));
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut config = TagReportConfig::default();
        config.report.uncategorized_title = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_locate_order() {
        let cwd = tempdir().unwrap();
        let home = tempdir().unwrap();
        let global = home.path().join(CONFIG_DIR).join(CONFIG_FILE);
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "").unwrap();

        let found = locate(None, None, cwd.path(), Some(home.path().to_path_buf()));
        assert_eq!(found, Some(global.clone()));

        let local = cwd.path().join(LOCAL_CONFIG_FILE);
        fs::write(&local, "").unwrap();
        let found = locate(None, None, cwd.path(), Some(home.path().to_path_buf()));
        assert_eq!(found, Some(local.clone()));

        let missing_env = cwd.path().join("missing.toml");
        let found = locate(None, Some(missing_env), cwd.path(), None);
        assert_eq!(found, Some(local));

        let explicit = cwd.path().join("explicit.toml");
        let found = locate(Some(&explicit), None, cwd.path(), None);
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn test_to_overrides() {
        let mut config = TagReportConfig::default();
        config.report.variant = StructureVariant::DimensionFirst;
        config.report.include_sub_column = true;
        config.export.excel_decoupled = true;

        let overrides = config.to_overrides();
        assert_eq!(overrides.variant, None);
        assert_eq!(overrides.default_variant, StructureVariant::DimensionFirst);
        assert!(overrides.default_include_sub_column);
        assert!(overrides.flags.excel_decoupled);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = TagReportConfig::default().to_toml().unwrap();
        let parsed: TagReportConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, TagReportConfig::default());
    }
}
