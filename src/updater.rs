//! 翻译更新器
//!
//! 执行单个翻译任务。每个任务的错误都在这里被收敛为 [`TaskOutcome::Failed`]，
//! 不会影响后续任务。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::helpers::log_error;
use crate::error::{SyncError, SyncResult};
use crate::tasks::{TaskKind, TranslationTask};
use crate::translator::{TranslationRequest, Translator};
use crate::vcs::{DiffBase, VersionControl};

/// 单个任务的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// 译文已写入（相对仓库根目录的路径）
    Written(PathBuf),
    /// 源文件内容没有实际变化，跳过
    Skipped,
    Failed(SyncError),
}

/// 翻译更新器
pub struct TranslationUpdater<'a, V, T> {
    repo_root: &'a Path,
    vcs: V,
    translator: T,
    diff_base: Option<DiffBase>,
}

impl<'a, V: VersionControl, T: Translator> TranslationUpdater<'a, V, T> {
    pub fn new(repo_root: &'a Path, vcs: V, translator: T, diff_base: Option<DiffBase>) -> Self {
        Self {
            repo_root,
            vcs,
            translator,
            diff_base,
        }
    }

    /// 执行任务
    pub fn execute(&self, task: &TranslationTask) -> TaskOutcome {
        tracing::info!("正在执行任务 {}", task);

        match self.try_execute(task) {
            Ok(Some(path)) => {
                tracing::info!("成功更新文件: {}", path.display());
                TaskOutcome::Written(path)
            }
            Ok(None) => TaskOutcome::Skipped,
            Err(e) => {
                let e = e.with_context(task);
                log_error(&e);
                TaskOutcome::Failed(e)
            }
        }
    }

    fn try_execute(&self, task: &TranslationTask) -> SyncResult<Option<PathBuf>> {
        let source_path = self.repo_root.join(task.source.to_path());
        let new_content = fs::read_to_string(&source_path)
            .map_err(|e| SyncError::content_read(&task.source.to_path(), e))?;

        let old_content = match task.kind {
            TaskKind::Create => String::new(),
            TaskKind::Update => self.old_content(task)?,
        };

        if task.kind == TaskKind::Update && old_content == new_content {
            tracing::info!("文件 {} 内容没有实际变化，跳过更新", task.source);
            return Ok(None);
        }

        let target = task.target_path();
        let target_path = self.repo_root.join(&target);
        let existing_translation = read_optional(&target_path)
            .map_err(|e| SyncError::content_read(&target, e))?
            .unwrap_or_else(|| {
                tracing::info!("目标文件 {} 不存在，将创建新翻译", target.display());
                String::new()
            });

        let request = TranslationRequest {
            language_name: task.language.name(),
            old_content: &old_content,
            new_content: &new_content,
            existing_translation: &existing_translation,
        };
        let translated = self.translator.translate(&request)?;

        if let Some(parent) = target_path.parent() {
            if !parent.is_dir() {
                fs::create_dir_all(parent).map_err(|e| SyncError::write(&target, e))?;
                tracing::info!("创建了目标目录: {}", parent.display());
            }
        }
        fs::write(&target_path, translated).map_err(|e| SyncError::write(&target, e))?;

        Ok(Some(target))
    }

    fn old_content(&self, task: &TranslationTask) -> SyncResult<String> {
        let Some(base) = &self.diff_base else {
            tracing::warn!("更新任务 {} 没有变更基准，按新文件处理", task);
            return Ok(String::new());
        };

        Ok(self
            .vcs
            .read_file_at_ref(base, &task.source)?
            .unwrap_or_default())
    }
}

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }

    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
