//! vpncore - VPN 客户端核心
//!
//! 账户令牌展示、中继缓存加载与界面标识

pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod metrics;
pub mod service;

// 重新导出常用类型
pub use app_state::AppState;
pub use error::{AppError, AppErrorCode};

pub mod prelude {
    pub use crate::{
        app_state::AppState,
        domain::{AccountToken, AccountTokenLabel, RelayList, ViewControllerIdentifier},
        error::{AppError, AppErrorCode},
        infrastructure::relay_cache::{RelayCache, RelayCacheError, RelayCacheReader},
        service::relay_selector::RelaySelector,
    };
}
