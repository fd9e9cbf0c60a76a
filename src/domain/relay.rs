//! 中继列表数据模型（缓存文件内容）

use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单个中继描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relay {
    pub hostname: String,
    pub country_code: String,
    pub city_code: String,
    pub ipv4_addr_in: Ipv4Addr,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub weight: u64,
    #[serde(default = "default_true")]
    pub include_in_country: bool,
}

fn default_true() -> bool {
    true
}

/// 中继列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayList {
    pub relays: Vec<Relay>,
}

impl RelayList {
    pub fn new(relays: Vec<Relay>) -> Self {
        Self { relays }
    }

    pub fn len(&self) -> usize {
        self.relays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relays.is_empty()
    }
}

/// 缓存中持久化的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRelays {
    pub relay_list: RelayList,
    pub updated_at: DateTime<Utc>,
}

impl CachedRelays {
    pub fn new(relay_list: RelayList, updated_at: DateTime<Utc>) -> Self {
        Self {
            relay_list,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_defaults_when_fields_missing() {
        let json = r#"{
            "hostname": "se-got-001",
            "country_code": "se",
            "city_code": "got",
            "ipv4_addr_in": "185.213.154.68"
        }"#;
        let relay: Relay = serde_json::from_str(json).unwrap();
        assert!(relay.active);
        assert!(relay.include_in_country);
        assert_eq!(relay.weight, 0);
        assert_eq!(relay.ipv4_addr_in, Ipv4Addr::new(185, 213, 154, 68));
    }

    #[test]
    fn test_cached_relays_layout() {
        let json = r#"{"relay_list":{"relays":[]},"updated_at":"2019-11-07T12:00:00Z"}"#;
        let cached: CachedRelays = serde_json::from_str(json).unwrap();
        assert!(cached.relay_list.is_empty());
        assert_eq!(cached.updated_at.to_rfc3339(), "2019-11-07T12:00:00+00:00");
    }
}
