//! # 翻译服务模块
//!
//! 外部翻译调用被视为一个不透明的阻塞函数：给定旧原文、新原文和现有译文，
//! 返回完整的更新后译文。
//!
//! # 模块组织
//!
//! - `prompt` - 提示词构建
//! - `openai` - Azure OpenAI 聊天补全接口实现

pub mod openai;
pub mod prompt;

use crate::error::SyncResult;

pub use openai::AzureOpenAiTranslator;

/// 一次翻译调用的上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRequest<'a> {
    /// 目标语言的可读名称
    pub language_name: &'a str,
    /// 旧原文，新文件或创建任务时为空
    pub old_content: &'a str,
    pub new_content: &'a str,
    /// 现有译文，不存在时为空
    pub existing_translation: &'a str,
}

impl TranslationRequest<'_> {
    /// 是否需要从头完整翻译
    pub fn is_full_translation(&self) -> bool {
        self.old_content.is_empty() || self.existing_translation.is_empty()
    }
}

/// 翻译函数
pub trait Translator {
    /// 返回完整的译文文档
    fn translate(&self, request: &TranslationRequest<'_>) -> SyncResult<String>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, request: &TranslationRequest<'_>) -> SyncResult<String> {
        (**self).translate(request)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, request: &TranslationRequest<'_>) -> SyncResult<String> {
        (**self).translate(request)
    }
}
