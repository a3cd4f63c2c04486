//! # 版本控制模块
//!
//! 核心逻辑只依赖 [`VersionControl`] 特性，具体实现为 `git` 命令行。
//!
//! # 模块组织
//!
//! - `git` - 基于 `git` 子进程的实现

pub mod git;

use std::fmt;
use std::path::Path;

use crate::error::SyncResult;
use crate::sources::SourcePath;

pub use git::GitCli;

/// 获取"旧内容"时使用的基准
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiffBase {
    /// 暂存区变更，旧内容取自 `HEAD`（pre-commit）
    Staged,
    /// 最近一次提交的变更，旧内容取自 `HEAD~1`（pre-push）
    PreviousCommit,
    /// CI 模式下显式给出的提交
    Commit(String),
}

impl DiffBase {
    /// 对应的 git 修订版本
    pub fn revision(&self) -> &str {
        match self {
            DiffBase::Staged => "HEAD",
            DiffBase::PreviousCommit => "HEAD~1",
            DiffBase::Commit(sha) => sha,
        }
    }
}

impl fmt::Display for DiffBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffBase::Staged => write!(f, "暂存区基准 ({})", self.revision()),
            DiffBase::PreviousCommit => write!(f, "上一个提交 ({})", self.revision()),
            DiffBase::Commit(sha) => write!(f, "提交 {}", sha),
        }
    }
}

/// 版本控制提供者
///
/// 所有操作都是阻塞调用。
pub trait VersionControl {
    /// 两个引用之间变更的路径
    fn list_changed_paths(&self, from: &str, to: &str) -> SyncResult<Vec<String>>;

    /// 已暂存但未提交的变更路径
    fn list_staged_paths(&self) -> SyncResult<Vec<String>>;

    /// 读取某个基准下的文件内容，文件在该基准下不存在时返回 `None`
    fn read_file_at_ref(&self, base: &DiffBase, path: &SourcePath) -> SyncResult<Option<String>>;

    /// 将文件加入下一次提交
    fn stage_path(&self, path: &Path) -> SyncResult<()>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn list_changed_paths(&self, from: &str, to: &str) -> SyncResult<Vec<String>> {
        (**self).list_changed_paths(from, to)
    }

    fn list_staged_paths(&self) -> SyncResult<Vec<String>> {
        (**self).list_staged_paths()
    }

    fn read_file_at_ref(&self, base: &DiffBase, path: &SourcePath) -> SyncResult<Option<String>> {
        (**self).read_file_at_ref(base, path)
    }

    fn stage_path(&self, path: &Path) -> SyncResult<()> {
        (**self).stage_path(path)
    }
}
