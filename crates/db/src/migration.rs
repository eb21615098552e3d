//! Import of legacy flat-file articles into the store.
//!
//! Files are handled one at a time; a failing file is recorded in the report
//! and the batch carries on.

use std::path::{Path, PathBuf};

use wikicache_core::error::CoreError;
use wikicache_core::legacy::{self, LegacyFormatError};

use crate::error::DbError;
use crate::models::article::NewArticle;
use crate::models::migration::{
    LegacyFileInfo, MigrationFileResult, MigrationOverview, MigrationReport, MigrationStatus,
};
use crate::repositories::ArticleRepo;
use crate::schema::Storage;

/// Legacy files in `dir`, sorted by name. A missing directory has no files.
pub fn list_legacy_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if legacy::is_legacy_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Import every legacy file in `dir`.
pub async fn migrate_directory(
    storage: &Storage,
    dir: &Path,
    delete_after: bool,
) -> Result<MigrationReport, DbError> {
    let files = list_legacy_files(dir)?;
    Ok(migrate_files(storage, &files, delete_after).await)
}

/// Import the given files, optionally deleting each one after it is stored.
pub async fn migrate_files(
    storage: &Storage,
    paths: &[PathBuf],
    delete_after: bool,
) -> MigrationReport {
    let mut report = MigrationReport::default();
    for path in paths {
        report.push(migrate_file(storage, path, delete_after).await);
    }

    tracing::info!(
        success = report.success_count,
        total = report.total_count,
        delete_after,
        "Legacy migration finished",
    );
    report
}

/// Import a single file.
pub async fn migrate_file(storage: &Storage, path: &Path, delete_after: bool) -> MigrationFileResult {
    let file = display_name(path);

    let parsed = match legacy::parse_file(path) {
        Ok(parsed) => parsed,
        Err(err) => {
            let status = match err {
                LegacyFormatError::Unreadable(_) => MigrationStatus::Error,
                _ => MigrationStatus::Invalid,
            };
            tracing::warn!(file = %file, error = %err, "Legacy file rejected");
            return MigrationFileResult {
                file,
                status,
                message: err.to_string(),
                article_id: None,
            };
        }
    };

    let input = NewArticle {
        title: parsed.title,
        content: parsed.content,
        url: Some(parsed.url),
        word_count: Some(parsed.word_count),
        char_count: Some(parsed.char_count),
        tags: Vec::new(),
    };

    match ArticleRepo::insert(storage, &input).await {
        Ok(id) => {
            let mut message = String::from("Migrated successfully");
            if delete_after {
                match std::fs::remove_file(path) {
                    Ok(()) => message.push_str("; source file deleted"),
                    Err(err) => {
                        tracing::warn!(file = %file, error = %err, "Could not delete migrated file");
                        message.push_str(&format!("; could not delete source file: {err}"));
                    }
                }
            }
            MigrationFileResult {
                file,
                status: MigrationStatus::Success,
                message,
                article_id: Some(id),
            }
        }
        Err(DbError::Core(CoreError::Conflict(_))) => MigrationFileResult {
            file,
            status: MigrationStatus::Duplicate,
            message: "Article already exists in database".into(),
            article_id: None,
        },
        Err(err) => {
            tracing::error!(file = %file, error = %err, "Legacy file import failed");
            MigrationFileResult {
                file,
                status: MigrationStatus::Error,
                message: format!("Import failed: {err}"),
                article_id: None,
            }
        }
    }
}

/// Describe what is left to migrate in `dir` without changing anything.
pub async fn migration_status(storage: &Storage, dir: &Path) -> Result<MigrationOverview, DbError> {
    let files = list_legacy_files(dir)?;
    let mut infos = Vec::with_capacity(files.len());

    for path in &files {
        let info = match legacy::parse_file(path) {
            Ok(parsed) => {
                let migrated = ArticleRepo::find_id_by_title(storage, &parsed.title)
                    .await?
                    .is_some();
                LegacyFileInfo {
                    file: display_name(path),
                    title: Some(parsed.title),
                    migrated,
                    error: None,
                }
            }
            Err(err) => LegacyFileInfo {
                file: display_name(path),
                title: None,
                migrated: false,
                error: Some(err.to_string()),
            },
        };
        infos.push(info);
    }

    let migrated_files = infos.iter().filter(|i| i.migrated).count();
    Ok(MigrationOverview {
        legacy_dir: dir.display().to_string(),
        exists: dir.is_dir(),
        total_files: infos.len(),
        migrated_files,
        pending_files: infos.len() - migrated_files,
        files: infos,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
