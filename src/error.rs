use std::fmt;

use crate::infrastructure::relay_cache::RelayCacheError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorCode {
    RelayCacheUnavailable,
    ConfigInvalid,
    LoggingInitFailed,
    Internal,
}

impl AppErrorCode {
    /// 稳定的错误码字符串（与前端文案映射对齐）
    pub fn as_str(&self) -> &'static str {
        match self {
            AppErrorCode::RelayCacheUnavailable => "relay_cache_unavailable",
            AppErrorCode::ConfigInvalid => "config_invalid",
            AppErrorCode::LoggingInitFailed => "logging_init_failed",
            AppErrorCode::Internal => "internal",
        }
    }

    /// 用户可见的提示文案
    pub fn user_message(&self) -> &'static str {
        match self {
            AppErrorCode::RelayCacheUnavailable => "中继列表暂时不可用，请稍后重试",
            AppErrorCode::ConfigInvalid => "配置无效，请检查配置文件",
            AppErrorCode::LoggingInitFailed => "日志系统初始化失败",
            AppErrorCode::Internal => "服务开小差了，请稍后再试",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Relay cache unavailable")]
    RelayCache(#[from] RelayCacheError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> AppErrorCode {
        match self {
            AppError::RelayCache(_) => AppErrorCode::RelayCacheUnavailable,
            AppError::Config(_) => AppErrorCode::ConfigInvalid,
            AppError::Logging(_) => AppErrorCode::LoggingInitFailed,
            AppError::Internal(_) => AppErrorCode::Internal,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// 配置错误（保留 anyhow 上下文链）
    pub fn config(err: &anyhow::Error) -> Self {
        AppError::Config(format!("{:#}", err))
    }

    pub fn logging(err: impl fmt::Display) -> Self {
        AppError::Logging(err.to_string())
    }

    /// 把错误链展开成一行，便于日志输出
    pub fn display_chain(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str("\nCaused by: ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}
