//! 测试辅助模块
//! 提供中继缓存夹具

#![allow(dead_code)]

use std::path::Path;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use vpncore::domain::{CachedRelays, Relay, RelayList};

/// 缓存文件名
pub const CACHE_FILE_NAME: &str = "relays.json";

/// 夹具时间戳
pub fn fixture_updated_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 11, 7, 12, 0, 0).unwrap()
}

pub fn relay(hostname: &str, country_code: &str, city_code: &str, ip: &str) -> Relay {
    Relay {
        hostname: hostname.to_string(),
        country_code: country_code.to_string(),
        city_code: city_code.to_string(),
        ipv4_addr_in: ip.parse().expect("valid fixture ip"),
        active: true,
        weight: 100,
        include_in_country: true,
    }
}

/// 把原始 JSON 写入临时目录中的缓存文件
pub fn write_raw_cache(dir: &Path, json: &str) {
    std::fs::write(dir.join(CACHE_FILE_NAME), json).expect("Failed to write fixture cache");
}

/// 创建包含给定中继列表的缓存目录
pub fn cache_dir_with(relays: RelayList) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cached = CachedRelays::new(relays, fixture_updated_at());
    let json = serde_json::to_string(&cached).expect("Failed to encode fixture");
    write_raw_cache(dir.path(), &json);
    dir
}
