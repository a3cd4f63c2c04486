//! 配置管理模块
//!
//! 提供配置文件、环境变量和默认值三层配置，以及目标语言清单的解析

pub mod languages;
pub mod manager;

// 重新导出主要类型
pub use languages::{load_target_languages, parse_target_languages, TargetLanguage};
pub use manager::{ConfigManager, SyncConfig, TranslatorSettings};

/// 配置常量
pub mod constants {
    /// 源文档扩展名
    pub const SOURCE_EXTENSION: &str = "mdx";

    /// 源语言，从目标语言清单中剔除
    pub const SOURCE_LANGUAGE: &str = "en";

    /// 非递归扫描的根目录（仓库根目录本身）
    pub const FLAT_SOURCE_ROOTS: &[&str] = &["."];

    /// 递归扫描的根目录
    pub const RECURSIVE_SOURCE_ROOTS: &[&str] = &["essentials"];

    /// 目标语言清单
    pub const DEFAULT_LANGUAGES_FILE: &str = "docs.json";

    // 默认API设置
    pub const DEFAULT_ENDPOINT: &str = "https://azureopenai-east-us.openai.azure.com";
    pub const DEFAULT_API_VERSION: &str = "2025-04-01-preview";
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// 提示词中使用的语言名称
    pub const LANGUAGE_NAMES: &[(&str, &str)] = &[
        ("zh-Hans", "简体中文"),
        ("fr", "法语"),
        ("pt", "葡萄牙语"),
        ("de", "德语"),
        ("ja", "日语"),
        ("es", "西班牙语"),
    ];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "doc-sync.toml",
        ".doc-sync.toml",
        "~/.config/doc-sync/config.toml",
    ];

    // 环境变量文件，按顺序取第一个存在的
    pub const ENV_FILES: &[&str] = &[".env.local", ".env"];
}
