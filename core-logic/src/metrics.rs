use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_secs: u64,
    pub deletions: DeletionMetrics,
    pub fetches: FetchMetrics,
    pub rate_limits: RateLimitMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletionMetrics {
    pub total: u64,
    pub deleted: u64,
    pub failed: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchMetrics {
    pub pages: u64,
    pub ids_seen: u64,
    pub avg_latency_ms: f64,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateLimitMetrics {
    pub hits: u64,
    pub backoffs: u64,
}

#[derive(Debug)]
pub struct MetricsCollector {
    deleted: AtomicU64,
    delete_failed: AtomicU64,
    pages: AtomicU64,
    ids_seen: AtomicU64,
    fetch_latency_sum_ms: AtomicU64,
    fetch_min_latency_ms: AtomicU64,
    fetch_max_latency_ms: AtomicU64,
    rate_limit_hits: AtomicU64,
    backoffs: AtomicU64,
    start_time: Instant,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            deleted: AtomicU64::new(0),
            delete_failed: AtomicU64::new(0),
            pages: AtomicU64::new(0),
            ids_seen: AtomicU64::new(0),
            fetch_latency_sum_ms: AtomicU64::new(0),
            fetch_min_latency_ms: AtomicU64::new(u64::MAX),
            fetch_max_latency_ms: AtomicU64::new(0),
            rate_limit_hits: AtomicU64::new(0),
            backoffs: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }
}

impl MetricsCollector {
    pub fn global() -> &'static Self {
        static INSTANCE: std::sync::OnceLock<MetricsCollector> = std::sync::OnceLock::new();
        INSTANCE.get_or_init(MetricsCollector::default)
    }

    pub fn record_page(&self, ids: usize, latency: Duration) {
        self.pages.fetch_add(1, Ordering::SeqCst);
        self.ids_seen.fetch_add(ids as u64, Ordering::SeqCst);

        let latency_ms = latency.as_millis() as u64;
        self.fetch_latency_sum_ms
            .fetch_add(latency_ms, Ordering::SeqCst);
        self.fetch_min_latency_ms
            .fetch_min(latency_ms, Ordering::SeqCst);
        self.fetch_max_latency_ms
            .fetch_max(latency_ms, Ordering::SeqCst);
    }

    pub fn record_delete(&self, success: bool) {
        if success {
            self.deleted.fetch_add(1, Ordering::SeqCst);
        } else {
            self.delete_failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn record_rate_limit(&self) {
        self.rate_limit_hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_backoff(&self) {
        self.backoffs.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let deleted = self.deleted.load(Ordering::SeqCst);
        let failed = self.delete_failed.load(Ordering::SeqCst);
        let total = deleted + failed;

        let pages = self.pages.load(Ordering::SeqCst);
        let latency = self.fetch_latency_sum_ms.load(Ordering::SeqCst);
        let min_latency = self.fetch_min_latency_ms.load(Ordering::SeqCst);

        MetricsSnapshot {
            timestamp: Utc::now().to_rfc3339(),
            uptime_secs: self.uptime().as_secs(),
            deletions: DeletionMetrics {
                total,
                deleted,
                failed,
                success_rate: if total > 0 {
                    deleted as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            },
            fetches: FetchMetrics {
                pages,
                ids_seen: self.ids_seen.load(Ordering::SeqCst),
                avg_latency_ms: if pages > 0 {
                    latency as f64 / pages as f64
                } else {
                    0.0
                },
                min_latency_ms: if min_latency == u64::MAX {
                    0
                } else {
                    min_latency
                },
                max_latency_ms: self.fetch_max_latency_ms.load(Ordering::SeqCst),
            },
            rate_limits: RateLimitMetrics {
                hits: self.rate_limit_hits.load(Ordering::SeqCst),
                backoffs: self.backoffs.load(Ordering::SeqCst),
            },
        }
    }

    pub fn to_json(&self) -> String {
        let snapshot = self.snapshot();
        serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    pub async fn export_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = self.to_json();
        tokio::fs::write(path, json).await
    }

    pub fn deleted(&self) -> u64 {
        self.deleted.load(Ordering::SeqCst)
    }

    pub fn delete_failed(&self) -> u64 {
        self.delete_failed.load(Ordering::SeqCst)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
