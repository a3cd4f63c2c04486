//! 暂存记录（仅本地模式）
//!
//! 把成功写入的译文加入下一次提交。单个文件暂存失败只记录日志。

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::helpers::log_error;
use crate::error::SyncError;
use crate::vcs::VersionControl;

/// 暂存结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    pub staged: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, SyncError)>,
}

/// 暂存去重后的译文路径
pub fn stage_outputs<V: VersionControl>(vcs: &V, written: &[PathBuf]) -> StageReport {
    let unique: BTreeSet<&PathBuf> = written.iter().collect();
    let mut report = StageReport::default();

    if unique.is_empty() {
        return report;
    }

    tracing::info!("正在将 {} 个译文文件添加到暂存区", unique.len());
    for path in unique {
        match vcs.stage_path(path) {
            Ok(()) => {
                tracing::info!(" - 已暂存: {}", path.display());
                report.staged.push(path.clone());
            }
            Err(e) => {
                let e = e.with_context(format!("暂存 {}", path.display()));
                log_error(&e);
                report.failures.push((path.clone(), e));
            }
        }
    }

    report
}
