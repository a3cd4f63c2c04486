//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: format!(
                            "Required environment variable not set ({})",
                            Self::DESCRIPTION
                        ),
                    })
                }
            }
        }
    }

    /// 仅当变量已设置时返回值，解析失败仍然报错
    fn get_if_set() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "DOC_SYNC_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }

    /// 目标语言清单文件
    pub struct LanguagesFile;
    impl EnvVar<String> for LanguagesFile {
        const NAME: &'static str = "DOC_SYNC_LANGUAGES_FILE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path of the document listing target languages";

        fn parse(value: &str) -> EnvResult<String> {
            non_empty(value, Self::NAME)
        }
    }
}

/// 翻译服务相关环境变量
pub mod translation {
    use super::*;

    /// API密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "OPENAI_API_KEY";
        const DEFAULT: Option<String> = None; // 无默认值，必须设置
        const DESCRIPTION: &'static str = "API key for the translation model endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            non_empty(value, Self::NAME)
        }
    }

    /// 服务地址
    pub struct Endpoint;
    impl EnvVar<String> for Endpoint {
        const NAME: &'static str = "AZURE_OPENAI_ENDPOINT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Azure OpenAI endpoint URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim().trim_end_matches('/');
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Endpoint must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// API版本
    pub struct ApiVersion;
    impl EnvVar<String> for ApiVersion {
        const NAME: &'static str = "AZURE_OPENAI_API_VERSION";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Azure OpenAI API version";

        fn parse(value: &str) -> EnvResult<String> {
            non_empty(value, Self::NAME)
        }
    }

    /// 模型（部署）名称
    pub struct Model;
    impl EnvVar<String> for Model {
        const NAME: &'static str = "AZURE_OPENAI_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Model deployment used for translation";

        fn parse(value: &str) -> EnvResult<String> {
            non_empty(value, Self::NAME)
        }
    }
}

/// 辅助函数
fn non_empty(value: &str, var_name: &str) -> EnvResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Value cannot be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

/// 环境变量配置汇总
#[derive(Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,
    pub languages_file: Option<String>,

    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub model: Option<String>,

    /// 解析失败、已回退到默认值的日志设置
    pub ignored: Vec<EnvError>,
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("log_level", &self.log_level)
            .field("no_color", &self.no_color)
            .field("languages_file", &self.languages_file)
            .field("api_key", &self.api_key.as_ref().map(|_| "[configured]"))
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("ignored", &self.ignored)
            .finish()
    }
}

impl EnvConfig {
    /// 从环境变量加载配置
    ///
    /// 日志相关的变量无效时回退到默认值并记录在 `ignored` 中，
    /// 翻译服务相关的变量无效仍然报错。
    pub fn from_env() -> EnvResult<Self> {
        let mut ignored = Vec::new();
        let log_level = core::LogLevel::get().unwrap_or_else(|e| {
            ignored.push(e);
            "info".to_string()
        });
        let no_color = core::NoColor::get().unwrap_or_else(|e| {
            ignored.push(e);
            false
        });

        Ok(Self {
            log_level,
            no_color,
            languages_file: core::LanguagesFile::get_if_set()?,

            api_key: translation::ApiKey::get_if_set()?,
            endpoint: translation::Endpoint::get_if_set()?,
            api_version: translation::ApiVersion::get_if_set()?,
            model: translation::Model::get_if_set()?,
            ignored,
        })
    }

    /// 记录被忽略的无效设置（需要在日志初始化之后调用）
    pub fn log_ignored(&self) {
        for error in &self.ignored {
            tracing::warn!("{}，已使用默认值", error);
        }
    }
}
