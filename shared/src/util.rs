//! Small helpers shared across services.

/// Current wall-clock time as milliseconds since the Unix epoch.
///
/// Timestamps are stored and served as plain integers.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
