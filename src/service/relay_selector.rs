//! 中继选择器及其缓存加载适配器
//!
//! 加载流程是一次性的：定位缓存 → 读取 → 映射为 `RelaySelector`。
//! 缓存错误原样返回给调用方，这里不做重试或降级。

use std::future::Future;

use tokio::sync::oneshot;

use crate::{
    domain::relay::RelayList,
    infrastructure::relay_cache::{RelayCache, RelayCacheError, RelayCacheReader},
};

/// 一次加载的结果
pub type RelaySelectorResult = Result<RelaySelector, RelayCacheError>;

/// 包装一份中继列表，供上层做中继选择
#[derive(Debug, Clone, PartialEq)]
pub struct RelaySelector {
    relay_list: RelayList,
}

impl RelaySelector {
    pub fn new(relay_list: RelayList) -> Self {
        Self { relay_list }
    }

    pub fn relay_list(&self) -> &RelayList {
        &self.relay_list
    }

    pub fn into_relay_list(self) -> RelayList {
        self.relay_list
    }

    /// 从默认位置的中继缓存加载
    pub async fn loaded_from_relay_cache() -> RelaySelectorResult {
        let cache = RelayCache::with_default_location().await?;
        load_relay_selector(&cache).await
    }
}

/// 读取缓存并构造选择器；读取失败时原样返回缓存错误
pub async fn load_relay_selector<R>(reader: &R) -> RelaySelectorResult
where
    R: RelayCacheReader + ?Sized,
{
    crate::metrics::inc_relay_selector_load();
    let cached = reader.read().await?;
    Ok(RelaySelector::new(cached.relay_list))
}

/// 在 tokio 运行时上执行一次加载，通过单值通道返回结果
///
/// 丢弃 `Receiver` 即取消投递：加载 future 会被丢弃，但已提交给阻塞线程池的文件读取仍可能完成。
pub fn spawn_load<F>(load: F) -> oneshot::Receiver<RelaySelectorResult>
where
    F: Future<Output = RelaySelectorResult> + Send + 'static,
{
    let (mut response_tx, response_rx) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = tokio::select! {
            result = load => Some(result),
            _ = response_tx.closed() => None,
        };
        match outcome {
            Some(result) => {
                if response_tx.send(result).is_err() {
                    tracing::warn!("Unable to send relay selector back to caller");
                }
            }
            None => {
                crate::metrics::inc_relay_selector_load_cancelled();
                tracing::warn!("Relay selector load has been cancelled");
            }
        }
    });
    response_rx
}

/// `spawn_load` 的默认位置版本
pub fn spawn_loaded_from_relay_cache() -> oneshot::Receiver<RelaySelectorResult> {
    spawn_load(RelaySelector::loaded_from_relay_cache())
}
