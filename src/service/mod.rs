//! Service 模块
//!
//! 中继选择器与缓存加载流程

pub mod relay_selector;

pub use relay_selector::{
    load_relay_selector, spawn_load, spawn_loaded_from_relay_cache, RelaySelector,
    RelaySelectorResult,
};
