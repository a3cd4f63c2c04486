//! 配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::constants;
use super::languages::{load_target_languages, TargetLanguage};
use crate::env::EnvConfig;
use crate::error::{SyncError, SyncResult};
use crate::sources::{SourceRoot, SourceScope};

/// 翻译服务设置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslatorSettings {
    pub endpoint: String,
    pub api_version: String,
    pub model: String,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            endpoint: constants::DEFAULT_ENDPOINT.to_string(),
            api_version: constants::DEFAULT_API_VERSION.to_string(),
            model: constants::DEFAULT_MODEL.to_string(),
        }
    }
}

/// 同步配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub source_roots: Vec<SourceRoot>,
    pub extension: String,
    pub source_language: String,
    pub languages_file: String,
    pub language_names: BTreeMap<String, String>,
    pub translator: TranslatorSettings,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let source_roots = constants::FLAT_SOURCE_ROOTS
            .iter()
            .map(|p| SourceRoot::flat(p))
            .chain(
                constants::RECURSIVE_SOURCE_ROOTS
                    .iter()
                    .map(|p| SourceRoot::recursive(p)),
            )
            .collect();

        let language_names = constants::LANGUAGE_NAMES
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();

        Self {
            source_roots,
            extension: constants::SOURCE_EXTENSION.to_string(),
            source_language: constants::SOURCE_LANGUAGE.to_string(),
            languages_file: constants::DEFAULT_LANGUAGES_FILE.to_string(),
            language_names,
            translator: TranslatorSettings::default(),
        }
    }
}

impl SyncConfig {
    /// 验证配置
    pub fn validate(&self) -> SyncResult<()> {
        if self.source_roots.is_empty() {
            return Err(SyncError::Config("源目录列表不能为空".to_string()));
        }

        if self.extension.trim_start_matches('.').is_empty() {
            return Err(SyncError::Config("源文件扩展名不能为空".to_string()));
        }

        if self.languages_file.trim().is_empty() {
            return Err(SyncError::Config("目标语言清单路径不能为空".to_string()));
        }

        if self.translator.model.trim().is_empty() {
            return Err(SyncError::Config("模型名称不能为空".to_string()));
        }

        let endpoint = &self.translator.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(SyncError::Config(format!(
                "服务地址必须以 http:// 或 https:// 开头: {}",
                endpoint
            )));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self, env: &EnvConfig) {
        if let Some(languages_file) = &env.languages_file {
            self.languages_file = languages_file.clone();
        }

        if let Some(endpoint) = &env.endpoint {
            self.translator.endpoint = endpoint.clone();
            tracing::info!("环境变量覆盖服务地址: {}", endpoint);
        }

        if let Some(api_version) = &env.api_version {
            self.translator.api_version = api_version.clone();
        }

        if let Some(model) = &env.model {
            self.translator.model = model.clone();
        }
    }

    /// 源文档范围
    pub fn scope(&self) -> SourceScope {
        SourceScope::new(self.source_roots.clone(), &self.extension)
    }

    /// 目标语言清单的完整路径（相对路径以仓库根目录为基准）
    pub fn languages_file_path(&self, repo_root: &Path) -> PathBuf {
        resolve_path(repo_root, &self.languages_file)
    }

    /// 加载目标语言
    pub fn target_languages(&self, repo_root: &Path) -> SyncResult<Vec<TargetLanguage>> {
        load_target_languages(
            &self.languages_file_path(repo_root),
            &self.source_language,
            &self.language_names,
        )
    }
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: SyncConfig,
    env: EnvConfig,
}

impl ConfigManager {
    /// 使用已经读取的环境变量创建
    ///
    /// 调用方先执行 [`ConfigManager::load_dotenv`] 并读取环境变量，
    /// 以便在初始化日志之前拿到日志设置。之后依次加载配置文件、
    /// 应用环境变量覆盖，最后校验。
    pub fn with_env(repo_root: &Path, env: EnvConfig) -> SyncResult<Self> {
        env.log_ignored();

        let mut config = Self::load_config(repo_root)?;
        config.apply_env_overrides(&env);
        config.validate()?;

        Ok(Self { config, env })
    }

    /// 获取配置
    pub fn get_config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn env(&self) -> &EnvConfig {
        &self.env
    }

    /// 从文件加载配置
    fn load_config(repo_root: &Path) -> SyncResult<SyncConfig> {
        for path in constants::CONFIG_PATHS {
            let candidate = resolve_path(repo_root, path);
            if candidate.is_file() {
                tracing::info!("加载配置文件: {}", candidate.display());
                return Self::load_from_file(&candidate);
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(SyncConfig::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &Path) -> SyncResult<SyncConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("读取配置文件失败: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SyncError::Config(format!("解析配置文件 {} 失败: {}", path.display(), e)))
    }

    /// 加载 .env 文件，返回实际加载的文件
    ///
    /// 已经设置的环境变量不会被覆盖。
    pub fn load_dotenv(repo_root: &Path) -> Option<PathBuf> {
        constants::ENV_FILES
            .iter()
            .map(|env_file| repo_root.join(env_file))
            .find(|path| path.is_file() && dotenv::from_path(path).is_ok())
    }
}

/// 展开 `~` 并以仓库根目录为基准解析相对路径
fn resolve_path(repo_root: &Path, path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    let expanded = Path::new(expanded.as_ref());
    if expanded.is_absolute() {
        expanded.to_path_buf()
    } else {
        repo_root.join(expanded)
    }
}
