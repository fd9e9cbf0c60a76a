//! vpncore 主入口

use std::sync::Arc;

use vpncore::{
    app_state::AppState,
    config::Config,
    error::AppError,
    infrastructure::{log_sanitizer::sanitize_log_message, logging},
};

#[tokio::main]
async fn main() {
    // 1. 加载环境变量
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        tracing::error!(
            code = e.code().as_str(),
            error = %sanitize_log_message(&e.display_chain()),
            "startup failed"
        );
        eprintln!("{}", e.code().user_message());
        eprintln!("{}", sanitize_log_message(&e.display_chain()));
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // 2. 加载配置（存在 CONFIG_PATH 时合并配置文件）
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::load(config_path.as_deref())?;

    // 3. 初始化日志（guard 需持有到进程退出）
    let _log_guard = logging::init_logging(&config.logging).map_err(AppError::logging)?;

    tracing::info!("Starting vpncore");

    // 4. 加载中继缓存
    let state = AppState::initialize(Arc::new(config)).await?;

    // 5. 初始界面
    let [root, child] = state.initial_view_controllers();
    tracing::info!(
        root = %root,
        child = %child,
        relays = state.relay_selector.as_ref().map(|s| s.relay_list().len()).unwrap_or(0),
        "initial view controllers selected"
    );

    if let Some(label) = state.account_token_label(None) {
        println!("Account: {}", label.display_value());
    }

    tracing::debug!(metrics = %vpncore::metrics::render_prometheus(), "startup metrics");

    Ok(())
}
