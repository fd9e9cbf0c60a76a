//! 中继列表磁盘缓存
//! 默认位置：RELAY_CACHE_DIR，未设置时为 $HOME/.cache/vpncore
//! 文件格式：JSON（`CachedRelays`）

use std::{
    io,
    path::{Path, PathBuf},
    time::Instant,
};

use async_trait::async_trait;

use crate::{
    config::RelayCacheConfig, domain::relay::CachedRelays,
    infrastructure::log_redact::redact_home_dir,
};

/// 缓存错误
#[derive(Debug, thiserror::Error)]
pub enum RelayCacheError {
    /// 无法确定默认缓存目录
    #[error("Cannot resolve the default relay cache location")]
    DefaultLocationNotFound,

    #[error("Failed to create relay cache directory")]
    CreateCacheDirectory(#[source] io::Error),

    #[error("Failed to read relay cache")]
    ReadCache(#[source] io::Error),

    #[error("Failed to decode relay cache")]
    DecodeCache(#[source] serde_json::Error),

    #[error("Failed to encode relay cache")]
    EncodeCache(#[source] serde_json::Error),

    #[error("Failed to write relay cache")]
    WriteCache(#[source] io::Error),
}

/// 缓存读取能力
#[async_trait]
pub trait RelayCacheReader: Send + Sync {
    async fn read(&self) -> Result<CachedRelays, RelayCacheError>;
}

#[derive(Debug, Clone)]
pub struct RelayCache {
    cache_path: PathBuf,
}

impl RelayCache {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
        }
    }

    /// 使用默认位置创建缓存（必要时创建目录）
    pub async fn with_default_location() -> Result<Self, RelayCacheError> {
        Self::with_config(&RelayCacheConfig::default()).await
    }

    pub async fn with_config(config: &RelayCacheConfig) -> Result<Self, RelayCacheError> {
        let cache_dir = resolve_cache_dir(config, std::env::var_os("HOME").map(PathBuf::from))?;
        tokio::fs::create_dir_all(&cache_dir)
            .await
            .map_err(RelayCacheError::CreateCacheDirectory)?;
        Ok(Self::new(cache_dir.join(&config.file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.cache_path
    }

    /// 原子写入：先写临时文件再重命名
    pub async fn write(&self, content: &CachedRelays) -> Result<(), RelayCacheError> {
        let data = serde_json::to_vec_pretty(content).map_err(RelayCacheError::EncodeCache)?;
        let temp_path = self.cache_path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &data)
            .await
            .map_err(RelayCacheError::WriteCache)?;
        tokio::fs::rename(&temp_path, &self.cache_path)
            .await
            .map_err(RelayCacheError::WriteCache)?;
        tracing::debug!(
            path = %log_path(&self.cache_path),
            relays = content.relay_list.len(),
            "relay_cache_written"
        );
        Ok(())
    }
}

#[async_trait]
impl RelayCacheReader for RelayCache {
    async fn read(&self) -> Result<CachedRelays, RelayCacheError> {
        let start = Instant::now();
        let result = read_cache_file(&self.cache_path).await;
        crate::metrics::observe_relay_cache_read_ms(start.elapsed().as_millis(), result.is_ok());
        match &result {
            Ok(cached) => tracing::debug!(
                path = %log_path(&self.cache_path),
                relays = cached.relay_list.len(),
                "relay_cache_read"
            ),
            Err(e) => tracing::warn!(
                path = %log_path(&self.cache_path),
                error = %e,
                "relay_cache_read_failed"
            ),
        }
        result
    }
}

async fn read_cache_file(path: &Path) -> Result<CachedRelays, RelayCacheError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(RelayCacheError::ReadCache)?;
    serde_json::from_slice(&data).map_err(RelayCacheError::DecodeCache)
}

fn log_path(path: &Path) -> String {
    let home = std::env::var("HOME").ok();
    redact_home_dir(&path.to_string_lossy(), home.as_deref())
}

fn resolve_cache_dir(
    config: &RelayCacheConfig,
    home: Option<PathBuf>,
) -> Result<PathBuf, RelayCacheError> {
    if let Some(dir) = config.cache_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    home.filter(|h| !h.as_os_str().is_empty())
        .map(|h| h.join(".cache").join("vpncore"))
        .ok_or(RelayCacheError::DefaultLocationNotFound)
}
