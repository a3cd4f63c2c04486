//! 基于 `git` 命令行的版本控制实现

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::{DiffBase, VersionControl};
use crate::error::{SyncError, SyncResult};
use crate::sources::SourcePath;

/// 在指定仓库目录中执行 `git`
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: &Path) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
        }
    }

    fn output(&self, args: &[&str]) -> SyncResult<Output> {
        Command::new("git")
            .args(["-c", "core.quotepath=off"])
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|e| SyncError::VcsQuery(format!("无法执行 git {}: {}", args.join(" "), e)))
    }

    fn run(&self, args: &[&str]) -> SyncResult<String> {
        let output = self.output(args)?;

        if !output.status.success() {
            return Err(SyncError::VcsQuery(format!(
                "git {} 失败 ({}): {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            SyncError::VcsQuery(format!("git {} 输出不是有效的 UTF-8: {}", args.join(" "), e))
        })
    }

    fn run_name_list(&self, args: &[&str]) -> SyncResult<Vec<String>> {
        let stdout = self.run(args)?;
        Ok(split_name_list(&stdout))
    }
}

/// 解析 `-z` 格式的路径列表
fn split_name_list(stdout: &str) -> Vec<String> {
    stdout
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

impl VersionControl for GitCli {
    fn list_changed_paths(&self, from: &str, to: &str) -> SyncResult<Vec<String>> {
        self.run_name_list(&["diff", "--name-only", "-z", from, to])
    }

    fn list_staged_paths(&self) -> SyncResult<Vec<String>> {
        self.run_name_list(&["diff", "--name-only", "-z", "--cached"])
    }

    fn read_file_at_ref(&self, base: &DiffBase, path: &SourcePath) -> SyncResult<Option<String>> {
        let object = format!("{}:{}", base.revision(), path.as_str());
        let output = self.output(&["show", &object])?;

        if !output.status.success() {
            // 文件在旧版本中不存在（例如新增文件）
            tracing::debug!(
                "{} 在 {} 中不存在: {}",
                path,
                base,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }

        String::from_utf8(output.stdout)
            .map(Some)
            .map_err(|e| SyncError::content_read(&path.to_path(), e).with_context(base))
    }

    fn stage_path(&self, path: &Path) -> SyncResult<()> {
        let path = path.to_string_lossy();
        self.run(&["add", "--", path.as_ref()]).map(|_| ())
    }
}
