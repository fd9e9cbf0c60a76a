//! 账户令牌（Account Token）领域模型
//! 令牌属于敏感凭据：构造后不可变，只用于格式化展示与原样复制

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::infrastructure::log_redact::{redact_account_token, SensitiveRedact};

/// 每组字符数
const GROUP_SIZE: usize = 4;

/// 账户令牌包装器（使用Zeroize保护）
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccountToken(String);

impl AccountToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// 从用户输入构造：去除所有空白字符
    ///
    /// 粘贴回来的展示格式（`1234 5678 ...`）会还原为原始令牌
    pub fn from_user_input(input: &str) -> Self {
        Self(input.chars().filter(|c| !c.is_whitespace()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 展示用的分组格式
    pub fn formatted(&self) -> String {
        format_account_token(&self.0)
    }
}

impl PartialEq for AccountToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for AccountToken {}

impl fmt::Debug for AccountToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccountToken")
            .field(&redact_account_token(&self.0))
            .finish()
    }
}

impl SensitiveRedact for AccountToken {
    fn redact(&self) -> String {
        redact_account_token(&self.0)
    }
}

/// 格式化账户令牌：每4个字符后插入一个空格（末尾除外）
///
/// 对任意字符串都有定义，按 `char` 处理，不会切断多字节字符。
///
/// ```
/// use vpncore::domain::account_token::format_account_token;
/// assert_eq!(format_account_token("1234567890123456"), "1234 5678 9012 3456");
/// assert_eq!(format_account_token("12345"), "1234 5");
/// ```
pub fn format_account_token(token: &str) -> String {
    let char_count = token.chars().count();
    let mut formatted = String::with_capacity(token.len() + char_count / GROUP_SIZE);
    for (i, c) in token.chars().enumerate() {
        formatted.push(c);
        let position = i + 1;
        if position % GROUP_SIZE == 0 && position != char_count {
            formatted.push(' ');
        }
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_full_token() {
        assert_eq!(
            format_account_token("1234567890123456"),
            "1234 5678 9012 3456"
        );
    }

    #[test]
    fn test_format_short_and_empty() {
        assert_eq!(format_account_token(""), "");
        assert_eq!(format_account_token("123"), "123");
        assert_eq!(format_account_token("1234"), "1234");
        assert_eq!(format_account_token("12345"), "1234 5");
    }

    #[test]
    fn test_format_multibyte() {
        // 不应在字符中间切断
        assert_eq!(format_account_token("账户令牌测试"), "账户令牌 测试");
    }

    #[test]
    fn test_from_user_input_restores_raw_token() {
        let raw = "1234567890123456";
        let pasted = format_account_token(raw);
        assert_eq!(AccountToken::from_user_input(&pasted).as_str(), raw);
        assert_eq!(
            AccountToken::from_user_input("  1234\t5678\n").as_str(),
            "12345678"
        );
    }

    #[test]
    fn test_distinct_tokens_render_distinct() {
        let tokens = ["1111222233334444", "1111222233334445", "111122223333444", "0"];
        for (i, a) in tokens.iter().enumerate() {
            for b in tokens.iter().skip(i + 1) {
                assert_ne!(format_account_token(a), format_account_token(b));
            }
        }
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = AccountToken::new("1234567890123456");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("1234567890123456"));
        assert!(debug.contains("1234"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(AccountToken::new("1234"), AccountToken::new("1234"));
        assert_ne!(AccountToken::new("1234"), AccountToken::new("12345"));
    }
}
