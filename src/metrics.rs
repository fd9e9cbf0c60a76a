use std::sync::{Mutex, MutexGuard, OnceLock};

static METRICS: OnceLock<Mutex<MetricsState>> = OnceLock::new();

#[derive(Debug, Clone, Default)]
struct MetricsState {
    // 中继缓存读取成功/失败与时延统计（毫秒）
    relay_cache_read_ok: u64,
    relay_cache_read_err: u64,
    relay_cache_read_latency_sum_ms: u128,
    // 简易直方图分桶（毫秒）：<1, <5, <25, <100, <500, >=500
    relay_cache_read_hist_buckets: [u64; 6],
    relay_selector_load_total: u64,
    relay_selector_load_cancelled: u64,
    clipboard_copy_total: u64,
}

const BUCKET_BOUNDS_MS: [u128; 5] = [1, 5, 25, 100, 500];

fn state() -> MutexGuard<'static, MetricsState> {
    let lock = METRICS.get_or_init(|| Mutex::new(MetricsState::default()));
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(), // 避免因锁污染导致 panic
    }
}

pub fn observe_relay_cache_read_ms(ms: u128, ok: bool) {
    let mut s = state();
    if ok {
        s.relay_cache_read_ok += 1;
    } else {
        s.relay_cache_read_err += 1;
    }
    s.relay_cache_read_latency_sum_ms += ms;
    let idx = BUCKET_BOUNDS_MS
        .iter()
        .position(|bound| ms < *bound)
        .unwrap_or(BUCKET_BOUNDS_MS.len());
    s.relay_cache_read_hist_buckets[idx] += 1;
}

pub fn inc_relay_selector_load() {
    state().relay_selector_load_total += 1;
}

pub fn inc_relay_selector_load_cancelled() {
    state().relay_selector_load_cancelled += 1;
}

pub fn inc_clipboard_copy() {
    state().clipboard_copy_total += 1;
}

/// 当前计数快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub relay_cache_read_ok: u64,
    pub relay_cache_read_err: u64,
    pub relay_selector_load_total: u64,
    pub relay_selector_load_cancelled: u64,
    pub clipboard_copy_total: u64,
}

pub fn snapshot() -> MetricsSnapshot {
    let s = state();
    MetricsSnapshot {
        relay_cache_read_ok: s.relay_cache_read_ok,
        relay_cache_read_err: s.relay_cache_read_err,
        relay_selector_load_total: s.relay_selector_load_total,
        relay_selector_load_cancelled: s.relay_selector_load_cancelled,
        clipboard_copy_total: s.clipboard_copy_total,
    }
}

pub fn render_prometheus() -> String {
    let s = state().clone();
    let mut out = String::new();

    out.push_str("# HELP vpncore_relay_cache_reads_total Relay cache reads by outcome\n");
    out.push_str("# TYPE vpncore_relay_cache_reads_total counter\n");
    out.push_str(&format!(
        "vpncore_relay_cache_reads_total{{result=\"ok\"}} {}\n",
        s.relay_cache_read_ok
    ));
    out.push_str(&format!(
        "vpncore_relay_cache_reads_total{{result=\"error\"}} {}\n",
        s.relay_cache_read_err
    ));

    out.push_str("# HELP vpncore_relay_cache_read_latency_ms Relay cache read latency\n");
    out.push_str("# TYPE vpncore_relay_cache_read_latency_ms histogram\n");
    let mut cumulative = 0u64;
    for (i, bound) in BUCKET_BOUNDS_MS.iter().enumerate() {
        cumulative += s.relay_cache_read_hist_buckets[i];
        out.push_str(&format!(
            "vpncore_relay_cache_read_latency_ms_bucket{{le=\"{}\"}} {}\n",
            bound, cumulative
        ));
    }
    cumulative += s.relay_cache_read_hist_buckets[BUCKET_BOUNDS_MS.len()];
    out.push_str(&format!(
        "vpncore_relay_cache_read_latency_ms_bucket{{le=\"+Inf\"}} {}\n",
        cumulative
    ));
    out.push_str(&format!(
        "vpncore_relay_cache_read_latency_ms_sum {}\n",
        s.relay_cache_read_latency_sum_ms
    ));
    out.push_str(&format!(
        "vpncore_relay_cache_read_latency_ms_count {}\n",
        cumulative
    ));

    out.push_str("# HELP vpncore_relay_selector_loads_total Relay selector loads started\n");
    out.push_str("# TYPE vpncore_relay_selector_loads_total counter\n");
    out.push_str(&format!(
        "vpncore_relay_selector_loads_total {}\n",
        s.relay_selector_load_total
    ));
    out.push_str(
        "# HELP vpncore_relay_selector_loads_cancelled_total Loads whose receiver was dropped\n",
    );
    out.push_str("# TYPE vpncore_relay_selector_loads_cancelled_total counter\n");
    out.push_str(&format!(
        "vpncore_relay_selector_loads_cancelled_total {}\n",
        s.relay_selector_load_cancelled
    ));

    out.push_str("# HELP vpncore_clipboard_copies_total Clipboard copy actions\n");
    out.push_str("# TYPE vpncore_clipboard_copies_total counter\n");
    out.push_str(&format!(
        "vpncore_clipboard_copies_total {}\n",
        s.clipboard_copy_total
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_all_series() {
        observe_relay_cache_read_ms(3, true);
        observe_relay_cache_read_ms(900, false);
        let text = render_prometheus();
        assert!(text.contains("vpncore_relay_cache_reads_total{result=\"ok\"}"));
        assert!(text.contains("vpncore_relay_cache_read_latency_ms_bucket{le=\"+Inf\"}"));
        assert!(text.contains("vpncore_relay_selector_loads_cancelled_total"));
        assert!(text.contains("vpncore_clipboard_copies_total"));
    }

    #[test]
    fn test_counters_are_monotonic() {
        let before = snapshot();
        inc_clipboard_copy();
        inc_relay_selector_load();
        let after = snapshot();
        assert!(after.clipboard_copy_total > before.clipboard_copy_total);
        assert!(after.relay_selector_load_total > before.relay_selector_load_total);
    }
}
