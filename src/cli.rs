//! 两个命令行入口共用的启动逻辑

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::config::ConfigManager;
use crate::env::EnvConfig;
use crate::error::{SyncError, SyncResult};
use crate::pipeline::{Pipeline, RunOptions, RunReport};
use crate::translator::AzureOpenAiTranslator;
use crate::vcs::GitCli;

/// 启动准备：解析仓库根目录、加载 `.env`、读取环境变量并初始化日志
///
/// 这里返回的错误发生在日志初始化之前，由调用方直接输出到 stderr。
pub fn startup(root: Option<PathBuf>) -> SyncResult<(PathBuf, EnvConfig)> {
    let repo_root = resolve_root(root)?;
    let dotenv = ConfigManager::load_dotenv(&repo_root);
    let env = EnvConfig::from_env()?;

    init_tracing(&env);
    if let Some(path) = dotenv {
        tracing::info!("已加载环境变量文件: {}", path.display());
    }

    Ok((repo_root, env))
}

/// 初始化日志：优先使用 `RUST_LOG`，否则使用 `DOC_SYNC_LOG_LEVEL`
pub fn init_tracing(env: &EnvConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&env.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!env.no_color)
        .with_writer(std::io::stderr)
        .init();
}

/// 解析仓库根目录，默认为当前目录
pub fn resolve_root(root: Option<PathBuf>) -> SyncResult<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir()
            .map_err(|e| SyncError::Config(format!("无法获取当前目录: {}", e))),
    }
}

/// 加载配置、构造服务并运行
///
/// 只有配置错误会返回 `Err`，单个任务失败记录在报告里。
pub fn run(repo_root: &Path, env: EnvConfig, options: &RunOptions) -> SyncResult<RunReport> {
    let manager = ConfigManager::with_env(repo_root, env)?;
    let config = manager.get_config();
    let languages = config.target_languages(repo_root)?;

    // dry-run 不会调用翻译服务，缺少密钥时不报错
    let api_key = match &manager.env().api_key {
        Some(key) => key.clone(),
        None if options.dry_run => "dry-run".to_string(),
        None => {
            return Err(SyncError::Config(
                "OPENAI_API_KEY 环境变量未设置".to_string(),
            ))
        }
    };
    let translator = AzureOpenAiTranslator::new(config.translator.clone(), api_key)?;

    let pipeline = Pipeline::new(
        repo_root,
        config,
        languages,
        GitCli::new(repo_root),
        translator,
    );

    let report = pipeline.run(options);
    report.log_summary();
    Ok(report)
}
