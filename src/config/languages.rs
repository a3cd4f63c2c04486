//! 目标语言清单
//!
//! 目标语言来自文档站点配置（默认 `docs.json`）中的
//! `navigation.languages[].language`，剔除源语言后即为目标语言。

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::{SyncError, SyncResult};

/// 目标语言
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetLanguage {
    /// 语言标识，同时也是译文目录名
    pub code: String,
    /// 提示词中使用的可读名称
    pub display_name: Option<String>,
}

impl TargetLanguage {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: None,
        }
    }

    pub fn with_display_name(code: &str, display_name: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: Some(display_name.to_string()),
        }
    }

    /// 可读名称，未配置时回退到语言标识
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.code)
    }
}

#[derive(Debug, Deserialize)]
struct LanguagesDocument {
    #[serde(default)]
    navigation: Navigation,
}

#[derive(Debug, Default, Deserialize)]
struct Navigation {
    #[serde(default)]
    languages: Vec<LanguageEntry>,
}

#[derive(Debug, Deserialize)]
struct LanguageEntry {
    language: String,
}

/// 解析目标语言清单
///
/// 保持清单中的顺序，去掉源语言和重复项。结果为空视为配置错误。
pub fn parse_target_languages(
    content: &str,
    source_language: &str,
    display_names: &BTreeMap<String, String>,
) -> SyncResult<Vec<TargetLanguage>> {
    let document: LanguagesDocument = serde_json::from_str(content)?;

    let mut seen = HashSet::new();
    let languages: Vec<TargetLanguage> = document
        .navigation
        .languages
        .into_iter()
        .map(|entry| entry.language.trim().to_string())
        .filter(|code| !code.is_empty() && code != source_language)
        .filter(|code| seen.insert(code.clone()))
        .map(|code| TargetLanguage {
            display_name: display_names.get(&code).cloned(),
            code,
        })
        .collect();

    if languages.is_empty() {
        return Err(SyncError::Config(format!(
            "没有找到除 '{}' 之外的目标语言",
            source_language
        )));
    }

    Ok(languages)
}

/// 读取并解析目标语言清单文件
pub fn load_target_languages(
    path: &Path,
    source_language: &str,
    display_names: &BTreeMap<String, String>,
) -> SyncResult<Vec<TargetLanguage>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SyncError::Config(format!("读取目标语言清单 {} 失败: {}", path.display(), e))
    })?;

    let languages = parse_target_languages(&content, source_language, display_names)
        .map_err(|e| e.with_context(path.display()))?;

    tracing::info!(
        "从 {} 中成功加载目标语言: {:?}",
        path.display(),
        languages.iter().map(|l| l.code.as_str()).collect::<Vec<_>>()
    );
    Ok(languages)
}
