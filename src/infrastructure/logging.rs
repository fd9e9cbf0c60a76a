//! 日志系统配置模块
//! 支持结构化日志、日志级别配置和日志轮转

use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::LoggingConfig;

/// 日志文件名前缀
const LOG_FILE_PREFIX: &str = "vpncore.log";

/// 初始化日志系统
///
/// 启用文件日志时返回 `WorkerGuard`，调用方需持有到进程退出，否则缓冲区日志会丢失
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    // 设置日志级别过滤器
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_writer = if config.enable_file_logging {
        let log_dir = config
            .log_file_path
            .as_ref()
            .and_then(|p| Path::new(p).parent())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("./logs"));

        std::fs::create_dir_all(log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .max_log_files(config.max_files.max(1) as usize)
            .build(log_dir)?;
        Some(tracing_appender::non_blocking(file_appender))
    } else {
        None
    };

    let (file_writer, guard) = match file_writer {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    // 根据配置选择日志格式
    if config.format == "json" {
        let file_layer = file_writer.map(|w| {
            fmt::layer()
                .json()
                .with_writer(w)
                .with_timer(ChronoUtc::rfc_3339())
        });
        Registry::default()
            .with(filter)
            .with(file_layer)
            .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()))
            .try_init()?;
    } else {
        let file_layer = file_writer.map(|w| {
            fmt::layer()
                .with_writer(w)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
        });
        Registry::default()
            .with(filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(true),
            )
            .try_init()?;
    }

    Ok(guard)
}

/// 简化初始化（使用默认配置）
pub fn init_default_logging() -> Option<WorkerGuard> {
    let config = LoggingConfig::default();
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {}", e);
        // 回退到最基本的日志初始化
        let _ = tracing_subscriber::fmt().try_init();
        None
    })
}
