// 日志脱敏模块 - 防止账户令牌出现在自由文本日志中

use std::sync::LazyLock;

use regex::Regex;

use crate::infrastructure::log_redact::redact_account_token;

// 账户令牌正则（16位数字，允许展示格式中的单个空格分组）
static ACCOUNT_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4} ?\d{4} ?\d{4} ?\d{4}\b").unwrap());

/// 脱敏字符串中的敏感信息
pub fn sanitize_log_message(msg: &str) -> String {
    ACCOUNT_TOKEN_REGEX
        .replace_all(msg, |caps: &regex::Captures| {
            caps.get(0)
                .map(|m| {
                    let raw: String = m.as_str().chars().filter(|c| !c.is_whitespace()).collect();
                    redact_account_token(&raw)
                })
                .unwrap_or_else(|| "***".to_string())
        })
        .to_string()
}
