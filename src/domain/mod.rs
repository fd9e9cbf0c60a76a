//! Domain 模块
//!
//! 账户令牌、中继列表与界面标识等领域模型

pub mod account_token;
pub mod clipboard_label;
pub mod relay;
pub mod view_controller;

// 重新导出常用类型
pub use account_token::{format_account_token, AccountToken};
pub use clipboard_label::{AccountTokenLabel, Clipboard, ClipboardLabel, MemoryClipboard, TextStyle};
pub use relay::{CachedRelays, Relay, RelayList};
pub use view_controller::{UnknownViewControllerIdentifier, ViewControllerIdentifier};
