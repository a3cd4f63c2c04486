//! 提示词构建

use super::TranslationRequest;

/// 系统提示词
pub fn system_prompt(language_name: &str) -> String {
    format!(
        "你是一个专业的科技文档翻译员。你的任务是根据英文文档的变更，智能地更新对应的{lang}翻译。\n\
         - 你会收到三个部分的文本：旧的英文原文、新的英文原文、以及现有的{lang}翻译。\n\
         - 你的目标是找出新旧英文原文之间的差异，并将这些差异应用到{lang}翻译上。\n\
         - 保持翻译的风格和术语与现有的{lang}翻译一致。\n\
         - 如果英文原文是全新的（旧的英文原文为空），请将新的英文原文完整翻译成{lang}。\n\
         - 如果现有的翻译为空，也请将新的英文原文完整翻译成{lang}。\n\
         - 不要重新翻译整个文档，只更新发生变化的部分。\n\
         - 如果英文原文中有些部分没有变化，{lang}翻译中对应的部分也应该保持不变。\n\
         - 最终，你只需要输出更新后的、完整的{lang}文档内容，不要包含任何额外的解释或标记。",
        lang = language_name
    )
}

/// 用户提示词：旧原文、新原文、现有译文三段
pub fn user_prompt(request: &TranslationRequest<'_>) -> String {
    let lang = request.language_name;
    format!(
        "请根据以下英文文档的变更，更新相应的{lang}翻译。\n\n\
         --- [旧的英文原文] ---\n{old}\n\n\
         --- [新的英文原文] ---\n{new}\n\n\
         --- [现有的{lang}翻译（需要更新）] ---\n{existing}\n",
        lang = lang,
        old = request.old_content,
        new = request.new_content,
        existing = request.existing_translation,
    )
}
