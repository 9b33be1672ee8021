//! Time and hash utilities shared across the platform

use sha2::{Digest, Sha256};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Inclusive [start, end] millisecond bounds of the server-local calendar
/// day containing `at_millis`.
///
/// Daily quotas (free box, appreciation limits) are counted against this
/// window, so the reset happens at local midnight.
pub fn local_day_bounds(at_millis: i64) -> (i64, i64) {
    use chrono::{Local, TimeZone};

    let at = Local
        .timestamp_millis_opt(at_millis)
        .single()
        .unwrap_or_else(Local::now);
    let date = at.date_naive();
    let start = Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
        .single()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(at_millis);
    // 23:59:59.999 local
    let end = Local
        .from_local_datetime(&date.and_hms_milli_opt(23, 59, 59, 999).expect("valid time"))
        .single()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(at_millis);
    (start, end)
}

/// Whole elapsed hours between two millisecond instants, floored at zero.
pub fn elapsed_hours(from_millis: i64, to_millis: i64) -> i64 {
    const HOUR_MS: i64 = 3_600_000;
    ((to_millis - from_millis) / HOUR_MS).max(0)
}

/// Generate a simulated on-chain hash for a newly issued share.
///
/// Globally unique: SHA-256 over the owning user, the copyright, the issue
/// instant and a random nonce, hex-encoded. No real chain is involved.
pub fn simulated_chain_hash(user_id: &str, copyright_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(copyright_id.as_bytes());
    hasher.update(now_millis().to_be_bytes());
    hasher.update(uuid::Uuid::new_v4().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_hours_floors_and_clamps() {
        assert_eq!(elapsed_hours(0, 3_599_999), 0);
        assert_eq!(elapsed_hours(0, 3_600_000), 1);
        assert_eq!(elapsed_hours(0, 9_000_000), 2);
        // Clock skew must not produce negative accrual
        assert_eq!(elapsed_hours(10_000, 0), 0);
    }

    #[test]
    fn day_bounds_contain_the_instant() {
        let now = now_millis();
        let (start, end) = local_day_bounds(now);
        assert!(start <= now && now <= end);
        // Never wider than a day plus a DST shift
        assert!(end - start < 90_000_000);
    }

    #[test]
    fn chain_hashes_are_unique_per_call() {
        let a = simulated_chain_hash("user:u1", "copyright:c1");
        let b = simulated_chain_hash("user:u1", "copyright:c1");
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
