//! Time helpers shared across host contracts and adapters.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_time_is_after_2020() {
        assert!(unix_time_ms_now() > 1_577_836_800_000);
    }
}
