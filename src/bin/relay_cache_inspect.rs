use anyhow::{Context, Result};
use vpncore::{
    config::RelayCacheConfig,
    domain::AccountToken,
    infrastructure::relay_cache::{RelayCache, RelayCacheReader},
};

#[derive(Debug, Default)]
struct Args {
    cache_dir: Option<String>,
    account_token: Option<String>,
}

fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cache-dir" => {
                parsed.cache_dir = Some(args.next().context("--cache-dir requires a value")?);
            }
            "--account-token" => {
                parsed.account_token =
                    Some(args.next().context("--account-token requires a value")?);
            }
            other => anyhow::bail!(
                "unknown argument: {other}\nusage: relay_cache_inspect [--cache-dir <dir>] [--account-token <token>]"
            ),
        }
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = vpncore::infrastructure::logging::init_default_logging();

    let args = parse_args(std::env::args().skip(1))?;
    run(args).await
}

/// 缓存不可读时返回错误，进程以非零状态退出
async fn run(args: Args) -> Result<()> {
    let mut config = RelayCacheConfig::default();
    if args.cache_dir.is_some() {
        config.cache_dir = args.cache_dir;
    }

    let cache = RelayCache::with_config(&config)
        .await
        .context("open relay cache")?;
    let cached = cache.read().await.context("read relay cache")?;

    println!("Relay cache: {}", cache.path().display());
    println!("Updated at:  {}", cached.updated_at.to_rfc3339());
    println!("Relays:      {}", cached.relay_list.len());
    for relay in &cached.relay_list.relays {
        let status = if relay.active { "active" } else { "inactive" };
        println!(
            "  {:20} {}-{} {:15} weight={} {}",
            relay.hostname,
            relay.country_code,
            relay.city_code,
            relay.ipv4_addr_in,
            relay.weight,
            status
        );
    }

    if let Some(raw) = args.account_token {
        let token = AccountToken::from_user_input(&raw);
        println!("Account:     {}", token.formatted());
    }

    Ok(())
}
