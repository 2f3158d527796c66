//! Orchestration of one translation run.
//!
//! Discovery happens once; then one task per (file, locale) pair runs
//! extract → diff → translate → merge. Tasks write to disjoint target files,
//! so they need no synchronization beyond the shared read-only base map. The
//! run waits for every spawned task and aggregates the outcomes; a single
//! failed task never fails the run.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::{
    diff, discover,
    error::Error,
    extract, merge,
    translate::TranslationProvider,
    types::LocaleResourceMap,
};

/// Read-only context for a run, handed to every task.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Project root containing the `app/` module.
    pub project_dir: PathBuf,

    /// The source-of-truth locale; its units define what must exist elsewhere.
    pub base_locale: String,

    /// Override for the resource directory (default `app/src/main/res`).
    pub res_dir: Option<PathBuf>,

    /// Override for the build-configuration file (default `app/build.gradle.kts`).
    pub build_config: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            base_locale: "en".to_string(),
            res_dir: None,
            build_config: None,
        }
    }

    pub fn with_base_locale(mut self, locale: impl Into<String>) -> Self {
        self.base_locale = locale.into();
        self
    }

    pub fn with_res_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.res_dir = Some(dir.into());
        self
    }

    pub fn with_build_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_config = Some(path.into());
        self
    }

    fn resolved_res_dir(&self) -> PathBuf {
        self.res_dir
            .clone()
            .unwrap_or_else(|| self.project_dir.join("app/src/main/res"))
    }

    fn resolved_build_config(&self) -> PathBuf {
        self.build_config
            .clone()
            .unwrap_or_else(|| self.project_dir.join("app/build.gradle.kts"))
    }
}

/// How one (file, locale) task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Missing units were translated and merged into the target file.
    Translated { units: usize },
    /// The target already covered every base unit; nothing was sent or written.
    UpToDate,
    /// The task aborted; sibling tasks are unaffected.
    Failed { error: String },
}

/// Outcome of one (file, locale) task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub file: String,
    pub locale: String,
    pub status: TaskStatus,
}

/// Aggregated outcomes of a run, so callers can retry failed pairs selectively.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub fn translated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TaskStatus::Translated { .. }))
            .count()
    }

    pub fn up_to_date(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == TaskStatus::UpToDate)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TaskStatus::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Runs one full translation pass over the project.
///
/// Fatal only when the base resource directory is unusable; every other
/// failure is recorded in the report against its (file, locale) pair. With no
/// configured locales or no matching files the run completes as a no-op.
pub async fn run(
    config: &RunConfig,
    provider: Arc<dyn TranslationProvider>,
) -> Result<RunReport, Error> {
    let res_dir = config.resolved_res_dir();
    let files = discover::resource_files(&res_dir)?;

    let build_config = config.resolved_build_config();
    let locales = match fs::read_to_string(&build_config) {
        Ok(text) => discover::locales_from_build_config(&text, &config.base_locale),
        Err(err) => {
            warn!(
                path = %build_config.display(),
                %err,
                "build configuration not readable, treating as no target locales"
            );
            Vec::new()
        }
    };

    info!(files = files.len(), locales = locales.len(), "starting translation run");
    let mut report = RunReport::default();
    if files.is_empty() || locales.is_empty() {
        return Ok(report);
    }

    let mut tasks = JoinSet::new();
    for file in &files {
        let file_name = match file.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        // The base map is extracted once per file and shared read-only
        // across that file's locale tasks.
        let base_map = match fs::read_to_string(file) {
            Ok(text) => Arc::new(extract::extract_units(&text)),
            Err(err) => {
                for locale in &locales {
                    report.outcomes.push(TaskOutcome {
                        file: file_name.clone(),
                        locale: locale.clone(),
                        status: TaskStatus::Failed { error: err.to_string() },
                    });
                }
                continue;
            }
        };

        for locale in &locales {
            let provider = Arc::clone(&provider);
            let base_map = Arc::clone(&base_map);
            let res_dir = res_dir.clone();
            let file_name = file_name.clone();
            let locale = locale.clone();
            tasks.spawn(async move {
                let status =
                    translate_one(&res_dir, &file_name, &locale, &base_map, provider.as_ref())
                        .await
                        .unwrap_or_else(|err| {
                            warn!(file = %file_name, locale = %locale, %err, "task failed");
                            TaskStatus::Failed { error: err.to_string() }
                        });
                TaskOutcome { file: file_name, locale, status }
            });
        }
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(err) => warn!(%err, "task panicked or was cancelled"),
        }
    }
    Ok(report)
}

/// One (file, locale) task: extract target, diff, request, merge, in sequence.
async fn translate_one(
    res_dir: &Path,
    file_name: &str,
    locale: &str,
    base_map: &LocaleResourceMap,
    provider: &dyn TranslationProvider,
) -> Result<TaskStatus, Error> {
    let target_path = merge::ensure_locale_file(res_dir, file_name, Some(locale))?;
    let target_text = fs::read_to_string(&target_path)?;
    let target_map = extract::extract_units(&target_text);

    let missing = diff::missing_units(base_map, &target_map);
    if missing.is_empty() {
        debug!(file = file_name, locale, "target is up to date");
        return Ok(TaskStatus::UpToDate);
    }

    let batch = missing
        .iter()
        .map(|unit| unit.markup.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let translated = provider.translate(&batch, locale).await?;
    merge::append_translated(&target_path, &translated)?;

    info!(file = file_name, locale, units = missing.len(), "merged translations");
    Ok(TaskStatus::Translated { units: missing.len() })
}
