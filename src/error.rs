//! 同步流程统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::env::EnvError;

/// 同步错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// 配置错误（目标语言缺失或配置文件格式错误）
    #[error("配置错误: {0}")]
    Config(String),

    /// 版本控制查询错误
    #[error("版本控制查询失败: {0}")]
    VcsQuery(String),

    /// 读取源文件或译文失败
    #[error("读取文件 {path} 失败: {reason}")]
    ContentRead { path: PathBuf, reason: String },

    /// 翻译服务调用失败或未返回可用内容
    #[error("翻译服务错误: {0}")]
    TranslationCall(String),

    /// 创建目录或写入译文失败
    #[error("写入文件 {path} 失败: {reason}")]
    Write { path: PathBuf, reason: String },

    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Usage(String),
}

impl SyncError {
    pub fn content_read<T: fmt::Display>(path: &Path, reason: T) -> Self {
        SyncError::ContentRead {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn write<T: fmt::Display>(path: &Path, reason: T) -> Self {
        SyncError::Write {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// 是否应终止整个运行
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Config(_) | SyncError::Usage(_))
    }

    /// 检查错误是否可重试
    ///
    /// 核心流程不做重试，这里只是给调用方的提示。
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::VcsQuery(_) => true,
            SyncError::TranslationCall(_) => true,
            SyncError::Config(_) => false,
            SyncError::ContentRead { .. } => false,
            SyncError::Write { .. } => false,
            SyncError::Usage(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SyncError::Config(_) => ErrorSeverity::Critical,
            SyncError::Usage(_) => ErrorSeverity::Critical,
            SyncError::VcsQuery(_) => ErrorSeverity::Warning,
            SyncError::ContentRead { .. } => ErrorSeverity::Error,
            SyncError::TranslationCall(_) => ErrorSeverity::Error,
            SyncError::Write { .. } => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::Config(_) => ErrorCategory::Configuration,
            SyncError::Usage(_) => ErrorCategory::Input,
            SyncError::VcsQuery(_) => ErrorCategory::VersionControl,
            SyncError::ContentRead { .. } => ErrorCategory::Filesystem,
            SyncError::Write { .. } => ErrorCategory::Filesystem,
            SyncError::TranslationCall(_) => ErrorCategory::Service,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        match &mut self {
            SyncError::Config(msg)
            | SyncError::VcsQuery(msg)
            | SyncError::TranslationCall(msg)
            | SyncError::Usage(msg) => {
                *msg = format!("{} (上下文: {})", msg, context);
            }
            SyncError::ContentRead { reason, .. } | SyncError::Write { reason, .. } => {
                *reason = format!("{} (上下文: {})", reason, context);
            }
        }

        self
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Input,
    VersionControl,
    Filesystem,
    Service,
}

impl From<EnvError> for SyncError {
    fn from(error: EnvError) -> Self {
        SyncError::Config(error.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(error: serde_json::Error) -> Self {
        SyncError::Config(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(error: toml::de::Error) -> Self {
        SyncError::Config(format!("TOML解析错误: {}", error))
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(error: reqwest::Error) -> Self {
        SyncError::TranslationCall(format!("HTTP请求失败: {}", error))
    }
}

/// 错误结果类型别名
pub type SyncResult<T> = Result<T, SyncError>;

/// 错误统计信息
#[derive(Debug, Clone, Default)]
pub struct ErrorStats {
    pub total_errors: usize,
    pub by_category: std::collections::HashMap<ErrorCategory, usize>,
    pub by_severity: std::collections::HashMap<ErrorSeverity, usize>,
    pub retryable_errors: usize,
}

impl ErrorStats {
    /// 记录错误
    pub fn record_error(&mut self, error: &SyncError) {
        self.total_errors += 1;
        *self.by_category.entry(error.category()).or_insert(0) += 1;
        *self.by_severity.entry(error.severity()).or_insert(0) += 1;

        if error.is_retryable() {
            self.retryable_errors += 1;
        }
    }

    pub fn count(&self, category: ErrorCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &SyncError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("{}", error),
            ErrorSeverity::Warning => tracing::warn!("{}", error),
            ErrorSeverity::Error => tracing::error!("{}", error),
            ErrorSeverity::Critical => tracing::error!("严重错误: {}", error),
        }
    }
}
