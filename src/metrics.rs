use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("ictus_requests_total", "Total number of requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "ictus_rate_limited_total",
        "Total requests denied by the rate limiter"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "ictus_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref LIMITER_KEYS: Gauge = register_gauge!(
        "ictus_limiter_keys",
        "Current number of tracked rate limit keys"
    )
    .unwrap();
}
