//! 可复制标签：展示格式化值，点击时把原始值写入剪贴板
//!
//! `AccountTokenLabel` 是 `ClipboardLabel` 针对账户令牌的特化：
//! 展示值永远是 `format_account_token(原始令牌)`，复制的永远是原始令牌。

use std::{
    fmt,
    sync::Mutex,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{domain::account_token::AccountToken, infrastructure::log_redact::redact_account_token};

/// 复制成功后提示文案的显示时长
pub const COPIED_MESSAGE_DURATION: Duration = Duration::from_millis(3000);

/// 复制成功提示文案
pub const COPIED_MESSAGE: &str = "COPIED TO CLIPBOARD!";

/// 系统剪贴板抽象
pub trait Clipboard {
    fn write_text(&self, text: &str);
}

/// 内存剪贴板（测试与无界面环境使用）
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_text(&self) -> Option<String> {
        match self.content.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) {
        let mut guard = match self.content.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(text.to_string());
    }
}

/// 文本样式描述（原样透传给渲染层）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// 通用可复制标签
/// 值可能是凭据：释放时清零，`Debug` 不输出内容
#[derive(Clone)]
pub struct ClipboardLabel {
    value: Zeroizing<String>,
    display_value: Zeroizing<String>,
    style: Option<TextStyle>,
    copied_until: Option<Instant>,
}

impl fmt::Debug for ClipboardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipboardLabel")
            .field("value", &"[REDACTED]")
            .field("display_value", &"[REDACTED]")
            .field("style", &self.style)
            .field("copied_until", &self.copied_until)
            .finish()
    }
}

impl ClipboardLabel {
    pub fn new(value: String, display_value: String, style: Option<TextStyle>) -> Self {
        Self {
            value: Zeroizing::new(value),
            display_value: Zeroizing::new(display_value),
            style,
            copied_until: None,
        }
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn display_value(&self) -> &str {
        self.display_value.as_str()
    }

    pub fn style(&self) -> Option<&TextStyle> {
        self.style.as_ref()
    }

    /// 复制原始值，并在 `COPIED_MESSAGE_DURATION` 内显示提示文案
    pub fn copy<C: Clipboard + ?Sized>(&mut self, clipboard: &C, now: Instant) {
        clipboard.write_text(self.value.as_str());
        self.copied_until = Some(now + COPIED_MESSAGE_DURATION);
        crate::metrics::inc_clipboard_copy();
    }

    /// 指定时刻应当显示的文本
    pub fn text_at(&self, now: Instant) -> &str {
        match self.copied_until {
            Some(until) if now < until => COPIED_MESSAGE,
            _ => self.display_value.as_str(),
        }
    }
}

/// 账户令牌标签
#[derive(Clone)]
pub struct AccountTokenLabel {
    inner: ClipboardLabel,
}

impl fmt::Debug for AccountTokenLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountTokenLabel")
            .field("value", &redact_account_token(self.value()))
            .field("style", &self.style())
            .finish()
    }
}

impl AccountTokenLabel {
    pub fn new(account_token: &AccountToken, style: Option<TextStyle>) -> Self {
        let value = account_token.as_str().to_string();
        let display_value = account_token.formatted();
        Self {
            inner: ClipboardLabel::new(value, display_value, style),
        }
    }

    /// 原始令牌（复制内容）
    pub fn value(&self) -> &str {
        self.inner.value()
    }

    /// 格式化后的令牌（展示内容）
    pub fn display_value(&self) -> &str {
        self.inner.display_value()
    }

    pub fn style(&self) -> Option<&TextStyle> {
        self.inner.style()
    }

    pub fn copy<C: Clipboard + ?Sized>(&mut self, clipboard: &C, now: Instant) {
        tracing::debug!(account_token = %redact_account_token(self.value()), "account_token_copied");
        self.inner.copy(clipboard, now);
    }

    pub fn text_at(&self, now: Instant) -> &str {
        self.inner.text_at(now)
    }
}
