//! 统一日志脱敏
//! 账户令牌、缓存路径等敏感数据只能以脱敏形式进入日志

/// 可脱敏trait
pub trait SensitiveRedact {
    fn redact(&self) -> String;
}

/// 脱敏账户令牌（只显示前4个字符）
pub fn redact_account_token(token: &str) -> String {
    let char_count = token.chars().count();
    if char_count <= 8 {
        return "*".repeat(char_count);
    }
    let prefix: String = token.chars().take(4).collect();
    format!("{}****", prefix)
}

/// 脱敏文件路径中的用户目录
/// 只替换完整的目录前缀，`/home/alice2` 不匹配 `/home/alice`
pub fn redact_home_dir(path: &str, home: Option<&str>) -> String {
    let home = match home.map(|h| h.trim_end_matches('/')).filter(|h| !h.is_empty()) {
        Some(home) => home,
        None => return path.to_string(),
    };
    match path.strip_prefix(home) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("~{}", rest),
        _ => path.to_string(),
    }
}

/// 脱敏的账户令牌日志
#[macro_export]
macro_rules! log_account_token_redacted {
    ($msg:literal, $token:expr) => {
        #[cfg(not(debug_assertions))]
        {
            use $crate::infrastructure::log_redact::SensitiveRedact;
            tracing::info!(account_token = %$token.redact(), $msg);
        }

        #[cfg(debug_assertions)]
        tracing::debug!(account_token = ?$token, $msg);
    };
}
