use chrono::Utc;

/// Current UNIX time in seconds, used for JWT claims.
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

/// Current UNIX time in milliseconds, the unit of the persisted token expiry.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
