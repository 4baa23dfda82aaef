use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregation::{CategoryScores, TierColumns};
use crate::{CoreError, Dialect};

/// Default directory for cached source pages.
pub const DEFAULT_CACHE_DIR: &str = "cache";
/// Default directory for record dumps and tables.
pub const DEFAULT_RESULT_DIR: &str = "results";

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub awards: Option<Vec<AwardConfig>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub cache_dir: Option<String>,
    pub result_dir: Option<String>,
}

/// One award list: where its yearly pages live and how to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardConfig {
    /// Short name used in output file names and records.
    pub prefix: String,
    pub dialect: Dialect,
    pub year_from: i32,
    pub year_to: i32,
    /// Page URL with `xxxx` standing for the year.
    pub url_template: String,
    /// Section heading id → score.
    pub categories: CategoryScores,
    /// Score values counted by the prize/short/long report columns.
    pub tiers: Option<TierColumns>,
}

impl AwardConfig {
    pub fn years(&self) -> RangeInclusive<i32> {
        self.year_from..=self.year_to
    }

    pub fn tiers(&self) -> TierColumns {
        self.tiers.unwrap_or_default()
    }

    pub fn cache_file(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join(format!("{}_cache.json", self.prefix))
    }

    pub fn records_file(&self, result_dir: &Path) -> PathBuf {
        result_dir.join(format!("{}_awards.json", self.prefix))
    }

    pub fn table_file(&self, result_dir: &Path) -> PathBuf {
        result_dir.join(format!("{}_table.csv", self.prefix))
    }
}

impl ConfigFile {
    pub fn cache_dir(&self) -> PathBuf {
        PathBuf::from(
            self.paths
                .as_ref()
                .and_then(|p| p.cache_dir.as_deref())
                .unwrap_or(DEFAULT_CACHE_DIR),
        )
    }

    pub fn result_dir(&self) -> PathBuf {
        PathBuf::from(
            self.paths
                .as_ref()
                .and_then(|p| p.result_dir.as_deref())
                .unwrap_or(DEFAULT_RESULT_DIR),
        )
    }

    /// Configured awards layered over the built-in ones.
    pub fn awards(&self) -> Vec<AwardConfig> {
        merge_awards(builtin_awards(), self.awards.clone().unwrap_or_default())
    }

    /// Look up an award by prefix.
    pub fn award(&self, prefix: &str) -> Option<AwardConfig> {
        self.awards().into_iter().find(|a| a.prefix == prefix)
    }
}

/// The two Russian literary awards the tool was written for.
pub fn builtin_awards() -> Vec<AwardConfig> {
    let scores = |pairs: &[(&str, u32)]| -> CategoryScores {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    };
    // Both lists score the longlist as 1.
    let tiers = Some(TierColumns {
        prize: 10,
        short: 5,
        long: 1,
    });

    vec![
        AwardConfig {
            prefix: "bigbook".to_string(),
            dialect: Dialect::Dash,
            year_from: 2006,
            year_to: 2023,
            url_template: "https://ru.wikipedia.org/wiki/%D0%A1%D0%BF%D0%B8%D1%81%D0%BE%D0%BA_%D0%BD%D0%BE%D0%BC%D0%B8%D0%BD%D0%B0%D0%BD%D1%82%D0%BE%D0%B2_%D0%BD%D0%B0_%D0%BF%D1%80%D0%B5%D0%BC%D0%B8%D1%8E_%C2%AB%D0%91%D0%BE%D0%BB%D1%8C%D1%88%D0%B0%D1%8F_%D0%BA%D0%BD%D0%B8%D0%B3%D0%B0%C2%BB_xxxx_%D0%B3%D0%BE%D0%B4%D0%B0".to_string(),
            categories: scores(&[
                ("Победители", 10),
                ("Список_финалистов", 5),
                ("Длинный_список", 1),
            ]),
            tiers,
        },
        AwardConfig {
            prefix: "natbest".to_string(),
            dialect: Dialect::Guillemet,
            year_from: 2001,
            year_to: 2022,
            url_template: "https://ru.wikipedia.org/wiki/%D0%A1%D0%BF%D0%B8%D1%81%D0%BE%D0%BA_%D0%BD%D0%BE%D0%BC%D0%B8%D0%BD%D0%B0%D0%BD%D1%82%D0%BE%D0%B2_%D0%BD%D0%B0_%D0%BF%D1%80%D0%B5%D0%BC%D0%B8%D1%8E_%C2%AB%D0%9D%D0%B0%D1%86%D0%B8%D0%BE%D0%BD%D0%B0%D0%BB%D1%8C%D0%BD%D1%8B%D0%B9_%D0%B1%D0%B5%D1%81%D1%82%D1%81%D0%B5%D0%BB%D0%BB%D0%B5%D1%80%C2%BB_xxxx_%D0%B3%D0%BE%D0%B4%D0%B0".to_string(),
            categories: scores(&[
                ("Победитель", 10),
                ("Короткий_список", 5),
                ("Длинный_список", 1),
            ]),
            tiers,
        },
    ]
}

/// Platform config directory path: `<config_dir>/laurels/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("laurels").join("config.toml"))
}

/// Load config by cascading CWD `.laurels.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".laurels.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match read_config(path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}

/// Read and parse a config file, reporting why it could not be used.
pub fn read_config(path: &Path) -> Result<ConfigFile, CoreError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        paths: Some(PathsConfig {
            cache_dir: overlay
                .paths
                .as_ref()
                .and_then(|p| p.cache_dir.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.cache_dir.clone())),
            result_dir: overlay
                .paths
                .as_ref()
                .and_then(|p| p.result_dir.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.result_dir.clone())),
        }),
        awards: match (base.awards, overlay.awards) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(merge_awards(b, o)),
        },
    }
}

/// Awards in `overlay` replace same-prefix awards in `base`; new prefixes
/// are appended in overlay order.
fn merge_awards(base: Vec<AwardConfig>, overlay: Vec<AwardConfig>) -> Vec<AwardConfig> {
    let mut merged = base;
    for award in overlay {
        match merged.iter_mut().find(|a| a.prefix == award.prefix) {
            Some(slot) => *slot = award,
            None => merged.push(award),
        }
    }
    merged
}

/// Save the config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, CoreError> {
    let path = config_path().ok_or(CoreError::NoConfigDir)?;
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save the config to an explicit path, creating parent directories.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
