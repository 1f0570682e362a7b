//! Project-specific utilities live here.

use time::OffsetDateTime;

/// Current UTC time truncated to the millisecond precision of BSON dates, so
/// that values handed to clients compare equal to what gets persisted.
pub fn now_millis() -> OffsetDateTime {
    bson::DateTime::now().to_time_0_3()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_no_sub_millisecond_component() {
        let now = now_millis();
        assert_eq!(now.nanosecond() % 1_000_000, 0);
        assert_eq!(now.offset(), time::UtcOffset::UTC);
    }
}
