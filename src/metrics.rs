//! 操作指标收集模块
//!
//! 统计属性读写、索引查找和图结构变更次数，支持快照和 Prometheus 文本导出

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 属性统计
    property_stats: PropertyStats,
    /// 索引统计
    index_stats: IndexStats,
    /// 图结构统计
    graph_stats: GraphStats,
    /// 启动时间
    start_time: Instant,
}

/// 属性统计
#[derive(Debug, Default)]
struct PropertyStats {
    /// 属性读取次数
    reads: AtomicU64,
    /// 属性写入次数
    writes: AtomicU64,
    /// 属性删除次数
    removals: AtomicU64,
    /// 被拒绝的写入（索引属性冲突等）
    rejected_writes: AtomicU64,
}

/// 索引统计
#[derive(Debug, Default)]
struct IndexStats {
    /// 反向查找次数
    lookups: AtomicU64,
    /// 反向查找未命中次数
    misses: AtomicU64,
}

/// 图结构统计
#[derive(Debug, Default)]
struct GraphStats {
    vertices_inserted: AtomicU64,
    vertices_removed: AtomicU64,
    edges_inserted: AtomicU64,
    edges_removed: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 属性指标
    pub property_reads: u64,
    pub property_writes: u64,
    pub property_removals: u64,
    pub rejected_writes: u64,

    // 索引指标
    pub index_lookups: u64,
    pub index_misses: u64,
    pub index_hit_rate: f64,

    // 图结构指标
    pub vertices_inserted: u64,
    pub vertices_removed: u64,
    pub edges_inserted: u64,
    pub edges_removed: u64,

    // 系统指标
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            property_stats: PropertyStats::default(),
            index_stats: IndexStats::default(),
            graph_stats: GraphStats::default(),
            start_time: Instant::now(),
        }
    }

    pub fn record_property_read(&self) {
        self.property_stats.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_property_write(&self) {
        self.property_stats.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_property_removal(&self) {
        self.property_stats.removals.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_write(&self) {
        self.property_stats
            .rejected_writes
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次索引查找
    pub fn record_index_lookup(&self, hit: bool) {
        self.index_stats.lookups.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.index_stats.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_vertex_insert(&self) {
        self.graph_stats
            .vertices_inserted
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_vertex_removal(&self) {
        self.graph_stats
            .vertices_removed
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_edge_insert(&self) {
        self.graph_stats.edges_inserted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_edge_removal(&self) {
        self.graph_stats.edges_removed.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let lookups = self.index_stats.lookups.load(Ordering::Relaxed);
        let misses = self.index_stats.misses.load(Ordering::Relaxed);
        let index_hit_rate = if lookups > 0 {
            (lookups - misses) as f64 / lookups as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            property_reads: self.property_stats.reads.load(Ordering::Relaxed),
            property_writes: self.property_stats.writes.load(Ordering::Relaxed),
            property_removals: self.property_stats.removals.load(Ordering::Relaxed),
            rejected_writes: self.property_stats.rejected_writes.load(Ordering::Relaxed),
            index_lookups: lookups,
            index_misses: misses,
            index_hit_rate,
            vertices_inserted: self.graph_stats.vertices_inserted.load(Ordering::Relaxed),
            vertices_removed: self.graph_stats.vertices_removed.load(Ordering::Relaxed),
            edges_inserted: self.graph_stats.edges_inserted.load(Ordering::Relaxed),
            edges_removed: self.graph_stats.edges_removed.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 文本格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let s = self.snapshot();
        let mut content = String::new();

        let counters: [(&str, &str, u64); 10] = [
            ("metagraph_property_reads_total", "Total property reads", s.property_reads),
            ("metagraph_property_writes_total", "Total property writes", s.property_writes),
            ("metagraph_property_removals_total", "Total property removals", s.property_removals),
            ("metagraph_rejected_writes_total", "Rejected property writes", s.rejected_writes),
            ("metagraph_index_lookups_total", "Total index lookups", s.index_lookups),
            ("metagraph_index_misses_total", "Index lookups without a match", s.index_misses),
            ("metagraph_vertices_inserted_total", "Vertices inserted", s.vertices_inserted),
            ("metagraph_vertices_removed_total", "Vertices removed", s.vertices_removed),
            ("metagraph_edges_inserted_total", "Edges inserted", s.edges_inserted),
            ("metagraph_edges_removed_total", "Edges removed", s.edges_removed),
        ];

        for (name, help, value) in counters {
            content.push_str(&format!("# HELP {} {}\n", name, help));
            content.push_str(&format!("# TYPE {} counter\n", name));
            content.push_str(&format!("{} {}\n", name, value));
        }

        content.push_str("# HELP metagraph_index_hit_rate Index lookup hit rate\n");
        content.push_str("# TYPE metagraph_index_hit_rate gauge\n");
        content.push_str(&format!("metagraph_index_hit_rate {}\n", s.index_hit_rate));

        content.push_str("# HELP metagraph_uptime_seconds Process uptime\n");
        content.push_str("# TYPE metagraph_uptime_seconds gauge\n");
        content.push_str(&format!("metagraph_uptime_seconds {}\n", s.uptime_seconds));

        PrometheusMetrics { content }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        metrics.record_property_write();
        metrics.record_property_write();
        metrics.record_property_read();
        metrics.record_index_lookup(true);
        metrics.record_index_lookup(false);
        metrics.record_vertex_insert();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.property_writes, 2);
        assert_eq!(snapshot.property_reads, 1);
        assert_eq!(snapshot.index_lookups, 2);
        assert_eq!(snapshot.index_misses, 1);
        assert!((snapshot.index_hit_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(snapshot.vertices_inserted, 1);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_edge_insert();

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("metagraph_edges_inserted_total 1"));
        assert!(prom.content.contains("# TYPE metagraph_index_hit_rate gauge"));
    }
}
