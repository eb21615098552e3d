//! Legacy-file migration report types.

use serde::Serialize;
use wikicache_core::types::DbId;

/// Outcome of importing a single legacy file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    /// The file was imported as a new article.
    Success,
    /// An article with the same title is already stored.
    Duplicate,
    /// The file is missing or does not follow the legacy format.
    Invalid,
    /// The file parsed but could not be stored.
    Error,
}

impl MigrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Duplicate => "duplicate",
            Self::Invalid => "invalid",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-file line of a [`MigrationReport`].
#[derive(Debug, Clone, Serialize)]
pub struct MigrationFileResult {
    pub file: String,
    pub status: MigrationStatus,
    pub message: String,
    pub article_id: Option<DbId>,
}

/// Result of a migration batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub results: Vec<MigrationFileResult>,
    pub success_count: usize,
    pub total_count: usize,
}

impl MigrationReport {
    pub fn push(&mut self, result: MigrationFileResult) {
        if result.status == MigrationStatus::Success {
            self.success_count += 1;
        }
        self.total_count += 1;
        self.results.push(result);
    }
}

/// A legacy file as seen before migrating.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyFileInfo {
    pub file: String,
    pub title: Option<String>,
    pub migrated: bool,
    pub error: Option<String>,
}

/// Snapshot of what is left to migrate in a legacy directory.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationOverview {
    pub legacy_dir: String,
    pub exists: bool,
    pub total_files: usize,
    pub migrated_files: usize,
    pub pending_files: usize,
    pub files: Vec<LegacyFileInfo>,
}
