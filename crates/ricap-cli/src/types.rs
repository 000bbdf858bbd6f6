use std::path::PathBuf;

use ricap_classify::ClassificationStats;

/// Which result files a run writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Both,
}

impl OutputFormat {
    pub fn wants_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }

    pub fn wants_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

#[derive(Debug)]
pub struct ClassifyReport {
    pub notes_path: PathBuf,
    pub rows: usize,
    pub referral_fallback: String,
    pub stats: ClassificationStats,
    /// Files written, empty for a dry run.
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
}
