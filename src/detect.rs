//! 变更检测
//!
//! 本地模式按优先级尝试：暂存区（pre-commit）→ 最近一次提交（pre-push）。
//! CI 模式只比较显式给出的两个提交。查询失败只记录日志并视为"没有变更"，
//! 全部失败时运行仍继续，只处理缺失的译文。

use std::collections::BTreeSet;

use crate::error::helpers::log_error;
use crate::sources::{SourcePath, SourceScope};
use crate::vcs::{DiffBase, VersionControl};

/// 变更来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectMode {
    /// 本地钩子：自动识别暂存区或上一个提交
    Local,
    /// CI：比较 `before..after`
    Ci { before: String, after: String },
}

/// 检测结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub changed: BTreeSet<SourcePath>,
    /// 获取旧内容的基准；没有变更时为 `None`
    pub diff_base: Option<DiffBase>,
}

impl ChangeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &SourcePath) -> bool {
        self.changed.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// 变更检测器
pub struct ChangeDetector<'a, V> {
    vcs: V,
    scope: &'a SourceScope,
}

impl<'a, V: VersionControl> ChangeDetector<'a, V> {
    pub fn new(vcs: V, scope: &'a SourceScope) -> Self {
        Self { vcs, scope }
    }

    /// 按模式检测变更
    pub fn detect(&self, mode: &DetectMode) -> ChangeSet {
        let result = match mode {
            DetectMode::Local => self.detect_local(),
            DetectMode::Ci { before, after } => self.detect_ci(before, after),
        };

        match &result.diff_base {
            Some(base) => tracing::info!(
                "检测到 {} 个源文件变更，基准: {}",
                result.changed.len(),
                base
            ),
            None => tracing::info!("没有检测到源文件变更"),
        }

        result
    }

    fn detect_local(&self) -> ChangeSet {
        let mut failures = 0;

        match self.vcs.list_staged_paths() {
            Ok(paths) => {
                let changed = self.scope.filter(paths);
                if !changed.is_empty() {
                    tracing::info!("检测到暂存区有变更 (pre-commit 模式): {:?}", changed);
                    return ChangeSet {
                        changed,
                        diff_base: Some(DiffBase::Staged),
                    };
                }
            }
            Err(e) => {
                failures += 1;
                log_error(&e.with_context("检查暂存区"));
            }
        }

        match self.vcs.list_changed_paths("HEAD~1", "HEAD") {
            Ok(paths) => {
                let changed = self.scope.filter(paths);
                if !changed.is_empty() {
                    tracing::info!("检测到上一个提交有变更 (pre-push 模式): {:?}", changed);
                    return ChangeSet {
                        changed,
                        diff_base: Some(DiffBase::PreviousCommit),
                    };
                }
            }
            Err(e) => {
                failures += 1;
                log_error(&e.with_context("检查上一个提交"));
            }
        }

        if failures == 2 {
            tracing::warn!("所有变更检测方式均失败，只处理缺失的译文");
        }

        ChangeSet::empty()
    }

    fn detect_ci(&self, before: &str, after: &str) -> ChangeSet {
        match self.vcs.list_changed_paths(before, after) {
            Ok(paths) => {
                let changed = self.scope.filter(paths);
                if changed.is_empty() {
                    return ChangeSet::empty();
                }
                tracing::info!("检测到 CI 中的源文件变更: {:?}", changed);
                ChangeSet {
                    changed,
                    diff_base: Some(DiffBase::Commit(before.to_string())),
                }
            }
            Err(e) => {
                log_error(&e.with_context(format!("比较 {}..{}", before, after)));
                tracing::warn!("无法获取变更列表，只处理缺失的译文");
                ChangeSet::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SyncError, SyncResult};
    use crate::sources::SourceRoot;
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct ScriptedVcs {
        staged: Option<Vec<&'static str>>,
        previous: Option<Vec<&'static str>>,
        calls: RefCell<Vec<String>>,
    }

    fn answer(paths: &Option<Vec<&'static str>>) -> SyncResult<Vec<String>> {
        match paths {
            Some(paths) => Ok(paths.iter().map(|p| p.to_string()).collect()),
            None => Err(SyncError::VcsQuery("fatal: bad revision".to_string())),
        }
    }

    impl VersionControl for ScriptedVcs {
        fn list_changed_paths(&self, from: &str, to: &str) -> SyncResult<Vec<String>> {
            self.calls.borrow_mut().push(format!("diff {} {}", from, to));
            answer(&self.previous)
        }

        fn list_staged_paths(&self) -> SyncResult<Vec<String>> {
            self.calls.borrow_mut().push("staged".to_string());
            answer(&self.staged)
        }

        fn read_file_at_ref(&self, _: &DiffBase, _: &SourcePath) -> SyncResult<Option<String>> {
            Ok(None)
        }

        fn stage_path(&self, _: &Path) -> SyncResult<()> {
            Ok(())
        }
    }

    fn scope() -> SourceScope {
        SourceScope::new(
            vec![SourceRoot::flat("."), SourceRoot::recursive("essentials")],
            "mdx",
        )
    }

    #[test]
    fn test_staged_changes_take_priority() {
        let vcs = ScriptedVcs {
            staged: Some(vec!["intro.mdx", "src/main.rs"]),
            previous: Some(vec!["guide.mdx"]),
            ..Default::default()
        };
        let scope = scope();
        let result = ChangeDetector::new(&vcs, &scope).detect(&DetectMode::Local);

        assert_eq!(result.diff_base, Some(DiffBase::Staged));
        assert!(result.contains(&SourcePath::new("intro.mdx")));
        assert_eq!(result.changed.len(), 1);
        assert_eq!(*vcs.calls.borrow(), vec!["staged".to_string()]);
    }

    #[test]
    fn test_out_of_scope_staged_changes_fall_through() {
        let vcs = ScriptedVcs {
            staged: Some(vec!["fr/intro.mdx", "docs.json"]),
            previous: Some(vec!["guide.mdx"]),
            ..Default::default()
        };
        let scope = scope();
        let result = ChangeDetector::new(&vcs, &scope).detect(&DetectMode::Local);

        assert_eq!(result.diff_base, Some(DiffBase::PreviousCommit));
        assert!(result.contains(&SourcePath::new("guide.mdx")));
    }

    #[test]
    fn test_staged_failure_falls_through() {
        let vcs = ScriptedVcs {
            staged: None,
            previous: Some(vec!["essentials/a.mdx"]),
            ..Default::default()
        };
        let scope = scope();
        let result = ChangeDetector::new(&vcs, &scope).detect(&DetectMode::Local);

        assert_eq!(result.diff_base, Some(DiffBase::PreviousCommit));
        assert_eq!(result.changed.len(), 1);
    }

    #[test]
    fn test_all_failures_yield_empty_set() {
        let vcs = ScriptedVcs::default();
        let scope = scope();
        let result = ChangeDetector::new(&vcs, &scope).detect(&DetectMode::Local);

        assert_eq!(result, ChangeSet::empty());
        assert_eq!(vcs.calls.borrow().len(), 2);
    }

    #[test]
    fn test_ci_mode_uses_explicit_range_only() {
        let vcs = ScriptedVcs {
            staged: Some(vec!["intro.mdx"]),
            previous: Some(vec!["essentials/a.mdx", "package.json"]),
            ..Default::default()
        };
        let scope = scope();
        let mode = DetectMode::Ci {
            before: "abc123".to_string(),
            after: "def456".to_string(),
        };
        let result = ChangeDetector::new(&vcs, &scope).detect(&mode);

        assert_eq!(result.diff_base, Some(DiffBase::Commit("abc123".to_string())));
        assert_eq!(result.changed.len(), 1);
        assert_eq!(*vcs.calls.borrow(), vec!["diff abc123 def456".to_string()]);
    }

    #[test]
    fn test_ci_mode_without_changes() {
        let vcs = ScriptedVcs {
            previous: Some(vec!["README.md"]),
            ..Default::default()
        };
        let scope = scope();
        let mode = DetectMode::Ci {
            before: "a".to_string(),
            after: "b".to_string(),
        };
        let result = ChangeDetector::new(&vcs, &scope).detect(&mode);
        assert!(result.is_empty());
        assert!(result.diff_base.is_none());
    }
}
