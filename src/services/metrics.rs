use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    pub static ref HTTP_REQUESTS_COUNTER: CounterVec = register_counter_vec!(
        "journal_http_requests_total",
        "HTTP requests by method and response status",
        &["method", "status"]
    )
    .unwrap();

    pub static ref ENTRY_WRITES_COUNTER: CounterVec = register_counter_vec!(
        "journal_entries_written_total",
        "Journal entries created, updated or deleted",
        &["op"]
    )
    .unwrap();
}
