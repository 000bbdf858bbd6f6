//! Run configuration.
//!
//! Sources, highest precedence first: command-line flags, the config file
//! (`--config`, else `ricap.toml` in the working directory), the
//! `RICAP_KEYWORDS_DIR` environment variable, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use ricap_classify::{ClassifyOptions, DEFAULT_REFERRAL_FALLBACK};
use ricap_ingest::KeywordLayout;
use ricap_model::{ClassificationDomain, IgnoreList};

pub const CONFIG_FILE_NAME: &str = "ricap.toml";

/// Environment variable overriding the keyword directory.
pub const KEYWORDS_DIR_ENV_VAR: &str = "RICAP_KEYWORDS_DIR";

pub const DEFAULT_KEYWORDS_DIR: &str = "keywords";
pub const DEFAULT_ILLNESS_FILE: &str = "illness_keywords.csv";
pub const DEFAULT_REFERRAL_FILE: &str = "mrr_keywords.csv";
pub const DEFAULT_SYMPTOM_FILE: &str = "symptom_keywords.csv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config file {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Contents of a `ricap.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub keywords: KeywordsSection,
    #[serde(default)]
    pub classification: ClassificationSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordsSection {
    pub dir: Option<PathBuf>,
    pub illness: Option<PathBuf>,
    pub referral: Option<PathBuf>,
    pub symptom: Option<PathBuf>,
    pub layout: Option<KeywordLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationSection {
    pub ignore: Option<Vec<String>>,
    pub referral_fallback: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parses config text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(fallback) = &config.classification.referral_fallback
            && fallback.trim().is_empty()
        {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "classification.referral_fallback must not be blank".to_string(),
            });
        }
        Ok(config)
    }
}

/// Finds and loads the config file, if any.
///
/// An explicit path must exist. Without one, `ricap.toml` in `cwd` is used
/// when present.
pub fn load_config_file(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = explicit {
        return ConfigFile::load(path).map(Some);
    }
    let implicit = cwd.join(CONFIG_FILE_NAME);
    if implicit.is_file() {
        debug!(path = %implicit.display(), "using config file");
        return ConfigFile::load(&implicit).map(Some);
    }
    Ok(None)
}

/// Keyword directory from the environment, ignoring blank values.
pub fn env_keywords_dir() -> Option<PathBuf> {
    std::env::var_os(KEYWORDS_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub keywords_dir: Option<PathBuf>,
    pub illness: Option<PathBuf>,
    pub referral: Option<PathBuf>,
    pub symptom: Option<PathBuf>,
    pub layout: Option<KeywordLayout>,
    pub ignore: Option<Vec<String>>,
    pub referral_fallback: Option<String>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub illness_path: PathBuf,
    pub referral_path: PathBuf,
    pub symptom_path: PathBuf,
    pub layout: KeywordLayout,
    pub ignore: IgnoreList,
    pub referral_fallback: String,
}

impl ResolvedConfig {
    /// Merges the sources in precedence order.
    ///
    /// File names from the config file or the defaults are relative to the
    /// keyword directory. File paths given on the command line are used as
    /// given.
    pub fn resolve(
        overrides: &ConfigOverrides,
        file: Option<&ConfigFile>,
        env_dir: Option<PathBuf>,
    ) -> Self {
        let keywords = file.map(|config| &config.keywords);
        let classification = file.map(|config| &config.classification);

        let dir = overrides
            .keywords_dir
            .clone()
            .or_else(|| keywords.and_then(|section| section.dir.clone()))
            .or(env_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYWORDS_DIR));

        let table_path = |cli: &Option<PathBuf>, configured: Option<&PathBuf>, default: &str| {
            cli.clone().unwrap_or_else(|| {
                dir.join(configured.map_or_else(|| PathBuf::from(default), Clone::clone))
            })
        };

        let illness_path = table_path(
            &overrides.illness,
            keywords.and_then(|section| section.illness.as_ref()),
            DEFAULT_ILLNESS_FILE,
        );
        let referral_path = table_path(
            &overrides.referral,
            keywords.and_then(|section| section.referral.as_ref()),
            DEFAULT_REFERRAL_FILE,
        );
        let symptom_path = table_path(
            &overrides.symptom,
            keywords.and_then(|section| section.symptom.as_ref()),
            DEFAULT_SYMPTOM_FILE,
        );

        let layout = overrides
            .layout
            .or_else(|| keywords.and_then(|section| section.layout))
            .unwrap_or_default();

        let ignore = overrides
            .ignore
            .as_ref()
            .or_else(|| classification.and_then(|section| section.ignore.as_ref()))
            .map_or_else(IgnoreList::standard, IgnoreList::new);

        let referral_fallback = overrides
            .referral_fallback
            .clone()
            .or_else(|| classification.and_then(|section| section.referral_fallback.clone()))
            .map(|fallback| fallback.trim().to_string())
            .filter(|fallback| !fallback.is_empty())
            .unwrap_or_else(|| DEFAULT_REFERRAL_FALLBACK.to_string());

        Self {
            illness_path,
            referral_path,
            symptom_path,
            layout,
            ignore,
            referral_fallback,
        }
    }

    pub fn table_path(&self, domain: ClassificationDomain) -> &Path {
        match domain {
            ClassificationDomain::Illness => &self.illness_path,
            ClassificationDomain::ReferralReason => &self.referral_path,
            ClassificationDomain::Symptom => &self.symptom_path,
        }
    }

    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions::default()
            .with_ignore(self.ignore.clone())
            .with_referral_fallback(self.referral_fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_any_source() {
        let config = ResolvedConfig::resolve(&ConfigOverrides::default(), None, None);
        assert_eq!(config.illness_path, Path::new("keywords").join("illness_keywords.csv"));
        assert_eq!(config.referral_path, Path::new("keywords").join("mrr_keywords.csv"));
        assert_eq!(config.symptom_path, Path::new("keywords").join("symptom_keywords.csv"));
        assert_eq!(config.layout, KeywordLayout::Columns);
        assert_eq!(config.ignore, IgnoreList::standard());
        assert_eq!(config.referral_fallback, "Other");
    }

    #[test]
    fn blank_fallback_in_file_is_rejected() {
        let err = ConfigFile::parse(
            "[classification]\nreferral_fallback = \"  \"\n",
            Path::new("ricap.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ConfigFile::parse("[keywords]\nfolder = \"x\"\n", Path::new("ricap.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }
}
