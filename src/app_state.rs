use std::sync::Arc;

use crate::{
    config::{Config, RelayCacheConfig},
    domain::{AccountToken, AccountTokenLabel, TextStyle, ViewControllerIdentifier},
    error::AppError,
    infrastructure::relay_cache::RelayCache,
    service::relay_selector::{load_relay_selector, spawn_load, RelaySelector, RelaySelectorResult},
};

/// 应用状态
/// 启动阶段加载的共享资源
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// 中继缓存不可用且允许降级启动时为 None
    pub relay_selector: Option<RelaySelector>,
    pub account_token: Option<AccountToken>,
}

impl AppState {
    /// 启动时加载中继列表
    pub async fn initialize(config: Arc<Config>) -> Result<Self, AppError> {
        let result = spawn_load(load_from_config(config.relay_cache.clone()))
            .await
            .map_err(|_| AppError::internal("relay selector load task terminated"))?;

        let relay_selector = match result {
            Ok(selector) => {
                tracing::info!(
                    relays = selector.relay_list().len(),
                    "relay_selector_loaded"
                );
                Some(selector)
            }
            Err(e) if config.startup.allow_degraded_start => {
                tracing::warn!(error = %e, "relay cache unavailable, starting without relays");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let account_token = config
            .account
            .token
            .as_ref()
            .map(|token| AccountToken::new(token.as_str()));
        if let Some(token) = &account_token {
            crate::log_account_token_redacted!("account_token_configured", token);
        }

        Ok(Self {
            config,
            relay_selector,
            account_token,
        })
    }

    /// 启动后展示的界面栈：Root 容器 + 登录页或主页
    pub fn initial_view_controllers(&self) -> [ViewControllerIdentifier; 2] {
        let child = match &self.account_token {
            Some(token) if !token.is_empty() => ViewControllerIdentifier::Main,
            _ => ViewControllerIdentifier::Login,
        };
        [ViewControllerIdentifier::Root, child]
    }

    pub fn account_token_label(&self, style: Option<TextStyle>) -> Option<AccountTokenLabel> {
        self.account_token
            .as_ref()
            .map(|token| AccountTokenLabel::new(token, style))
    }
}

async fn load_from_config(config: RelayCacheConfig) -> RelaySelectorResult {
    let cache = RelayCache::with_config(&config).await?;
    load_relay_selector(&cache).await
}
