use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

/// System message sent ahead of every summary request.
pub const SYSTEM_PROMPT: &str = "你是一个专业的内容总结助手，请按照用户的要求完成总结任务。";

/// Keeps the first `max_chars` characters of the page text.
///
/// This is a plain character-count cut with no word or sentence awareness; a page is
/// allowed to end mid-word. Counting is by `char` so the cut never splits a UTF-8
/// sequence.
#[must_use]
pub fn truncate_page_text(page_text: &str, max_chars: usize) -> &str {
    match page_text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &page_text[..byte_idx],
        None => page_text,
    }
}

/// Template, a blank line, then the (already truncated) page text in `'''` quotes.
#[must_use]
pub fn build_summary_prompt(template: &str, page_text: &str) -> String {
    format!("{template}\n\n'''{page_text}'''")
}

#[must_use]
pub fn build_chat_messages(user_prompt: String) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(SYSTEM_PROMPT.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(user_prompt),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}
