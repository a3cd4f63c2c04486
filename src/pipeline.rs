//! 同步流程编排
//!
//! 枚举 → 检测 → 识别任务 → 逐个执行 → 暂存。前三步是纯计算，
//! 执行阶段严格串行：一个任务（包括翻译调用和写文件）完成后才开始下一个。

use std::path::{Path, PathBuf};

use crate::config::{SyncConfig, TargetLanguage};
use crate::detect::{ChangeDetector, ChangeSet, DetectMode};
use crate::error::{ErrorCategory, ErrorStats, SyncError};
use crate::sources::SourceScope;
use crate::stage::{stage_outputs, StageReport};
use crate::tasks::{reconcile_in, TranslationTask};
use crate::translator::Translator;
use crate::updater::{TaskOutcome, TranslationUpdater};
use crate::vcs::{DiffBase, VersionControl};

/// 运行选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: DetectMode,
    /// 只计算任务，不调用翻译、不写文件、不暂存
    pub dry_run: bool,
    /// 是否暂存写入的译文
    pub stage: bool,
}

impl RunOptions {
    /// 本地钩子模式，写入后暂存
    pub fn local() -> Self {
        Self {
            mode: DetectMode::Local,
            dry_run: false,
            stage: true,
        }
    }

    /// CI 模式，不暂存
    pub fn ci(before: &str, after: &str) -> Self {
        Self {
            mode: DetectMode::Ci {
                before: before.to_string(),
                after: after.to_string(),
            },
            dry_run: false,
            stage: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// 运行报告
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub tasks: Vec<TranslationTask>,
    pub diff_base: Option<DiffBase>,
    /// 按执行顺序记录的已写入译文
    pub written: Vec<PathBuf>,
    pub skipped: Vec<TranslationTask>,
    pub failed: Vec<(TranslationTask, SyncError)>,
    pub stage: StageReport,
    pub errors: ErrorStats,
}

impl RunReport {
    pub fn log_summary(&self) {
        tracing::info!(
            "任务总数 {}，成功 {}，跳过 {}，失败 {}，已暂存 {}",
            self.tasks.len(),
            self.written.len(),
            self.skipped.len(),
            self.failed.len(),
            self.stage.staged.len()
        );

        if self.errors.total_errors > 0 {
            tracing::warn!(
                "错误分布: 翻译服务 {}，文件系统 {}，版本控制 {}",
                self.errors.count(ErrorCategory::Service),
                self.errors.count(ErrorCategory::Filesystem),
                self.errors.count(ErrorCategory::VersionControl)
            );
        }

        for (task, error) in &self.failed {
            tracing::warn!("失败任务 {}: {}", task, error);
        }
    }
}

/// 同步流程
pub struct Pipeline<'a, V, T> {
    repo_root: &'a Path,
    scope: SourceScope,
    languages: Vec<TargetLanguage>,
    vcs: V,
    translator: T,
}

impl<'a, V: VersionControl, T: Translator> Pipeline<'a, V, T> {
    pub fn new(
        repo_root: &'a Path,
        config: &SyncConfig,
        languages: Vec<TargetLanguage>,
        vcs: V,
        translator: T,
    ) -> Self {
        Self {
            repo_root,
            scope: config.scope(),
            languages,
            vcs,
            translator,
        }
    }

    /// 计算任务列表和变更集，不产生副作用
    pub fn plan(&self, mode: &DetectMode) -> (Vec<TranslationTask>, ChangeSet) {
        let sources = self.scope.enumerate(self.repo_root);
        let changes = ChangeDetector::new(&self.vcs, &self.scope).detect(mode);
        let tasks = reconcile_in(self.repo_root, &sources, &changes, &self.languages);
        (tasks, changes)
    }

    /// 完整运行
    pub fn run(&self, options: &RunOptions) -> RunReport {
        let (tasks, changes) = self.plan(&options.mode);
        let mut report = RunReport {
            diff_base: changes.diff_base.clone(),
            ..Default::default()
        };

        if options.dry_run {
            for task in &tasks {
                tracing::info!("(dry-run) {}", task);
            }
            report.tasks = tasks;
            return report;
        }

        let updater = TranslationUpdater::new(
            self.repo_root,
            &self.vcs,
            &self.translator,
            changes.diff_base,
        );

        for task in &tasks {
            match updater.execute(task) {
                TaskOutcome::Written(path) => report.written.push(path),
                TaskOutcome::Skipped => report.skipped.push(task.clone()),
                TaskOutcome::Failed(error) => {
                    report.errors.record_error(&error);
                    report.failed.push((task.clone(), error));
                }
            }
        }
        report.tasks = tasks;

        if options.stage {
            report.stage = stage_outputs(&self.vcs, &report.written);
            for (_, error) in &report.stage.failures {
                report.errors.record_error(error);
            }
        }

        report
    }
}
