//! 翻译任务识别
//!
//! 对每个源文件、每个目标语言：译文不存在则创建；译文存在且源文件
//! 有变更则更新；否则不做任何事。任务顺序为"源文件优先，语言其次"，
//! 即执行顺序。

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::TargetLanguage;
use crate::detect::ChangeSet;
use crate::sources::SourcePath;

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Create,
    Update,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Create => f.write_str("create"),
            TaskKind::Update => f.write_str("update"),
        }
    }
}

/// 翻译任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTask {
    pub source: SourcePath,
    pub language: TargetLanguage,
    pub kind: TaskKind,
}

impl TranslationTask {
    pub fn new(source: SourcePath, language: TargetLanguage, kind: TaskKind) -> Self {
        Self {
            source,
            language,
            kind,
        }
    }

    /// 译文相对路径
    pub fn target_path(&self) -> PathBuf {
        self.source.translated_path(&self.language.code)
    }
}

impl fmt::Display for TranslationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.kind, self.source, self.language.code)
    }
}

/// 计算任务列表
///
/// `target_exists` 接收译文的相对路径，便于脱离文件系统测试。
pub fn reconcile<F>(
    sources: &[SourcePath],
    changes: &ChangeSet,
    languages: &[TargetLanguage],
    mut target_exists: F,
) -> Vec<TranslationTask>
where
    F: FnMut(&Path) -> bool,
{
    let mut tasks = Vec::new();

    for source in sources {
        for language in languages {
            let target = source.translated_path(&language.code);
            let kind = if !target_exists(&target) {
                TaskKind::Create
            } else if changes.contains(source) {
                TaskKind::Update
            } else {
                continue;
            };

            tasks.push(TranslationTask::new(source.clone(), language.clone(), kind));
        }
    }

    tasks
}

/// 以仓库根目录下的实际路径判断译文是否存在，路径上已有目录也算存在
pub fn reconcile_in(
    repo_root: &Path,
    sources: &[SourcePath],
    changes: &ChangeSet,
    languages: &[TargetLanguage],
) -> Vec<TranslationTask> {
    let tasks = reconcile(sources, changes, languages, |target| {
        repo_root.join(target).exists()
    });

    if tasks.is_empty() {
        tracing::info!("没有检测到需要创建或更新的翻译文件");
    } else {
        tracing::info!("识别到 {} 个翻译任务", tasks.len());
    }

    tasks
}
