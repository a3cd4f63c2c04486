//! # Doc Sync Library
//!
//! 根据 git 变更增量翻译文档源文件：找出缺失或过期的（源文件 × 目标语言）
//! 译文，把旧原文、新原文和现有译文交给语言模型，写回更新后的译文。
//!
//! ## 模块组织
//!
//! - `env` - 类型安全的环境变量
//! - `error` - 统一错误类型
//! - `config` - 配置文件、目标语言清单
//! - `sources` - 源文档枚举与过滤
//! - `vcs` - 版本控制接口与 git 实现
//! - `detect` - 变更检测
//! - `tasks` - 翻译任务识别
//! - `translator` - 翻译服务接口与实现
//! - `updater` - 单个任务的执行
//! - `stage` - 暂存译文
//! - `pipeline` - 整体流程编排
//! - `cli` - 命令行入口共用逻辑（可选）

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod detect;
pub mod env;
pub mod error;
pub mod pipeline;
pub mod sources;
pub mod stage;
pub mod tasks;
pub mod translator;
pub mod updater;
pub mod vcs;

// Re-export commonly used items for convenience
pub use config::{ConfigManager, SyncConfig, TargetLanguage};
pub use detect::{ChangeDetector, ChangeSet, DetectMode};
pub use error::{SyncError, SyncResult};
pub use pipeline::{Pipeline, RunOptions, RunReport};
pub use sources::{SourcePath, SourceRoot, SourceScope};
pub use tasks::{reconcile, TaskKind, TranslationTask};
pub use translator::{TranslationRequest, Translator};
pub use vcs::{DiffBase, GitCli, VersionControl};
