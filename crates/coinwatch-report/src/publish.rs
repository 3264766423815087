//! When scheduled reports go out.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

/// Publish gate for scheduled reports.
///
/// With an hour set, reports are only published while the clock reads that
/// hour; without one, every run publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishPolicy {
    hour: Option<u32>,
}

impl PublishPolicy {
    pub fn new(hour: Option<u32>) -> Self {
        Self {
            hour: hour.filter(|h| *h < 24),
        }
    }

    pub fn hour(&self) -> Option<u32> {
        self.hour
    }

    pub fn should_publish(&self, now: NaiveDateTime) -> bool {
        match self.hour {
            Some(hour) => now.hour() == hour,
            None => true,
        }
    }

    /// Next instant strictly after `now` at which a scheduled run is due.
    ///
    /// That is the top of the publish hour, or the next midnight when no
    /// hour is configured.
    pub fn next_run(&self, now: NaiveDateTime) -> NaiveDateTime {
        let hour = self.hour.unwrap_or(0);
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
        let candidate = now.date().and_time(time);
        if candidate > now {
            candidate
        } else {
            candidate + Duration::days(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 2)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    #[test]
    fn test_gate_honors_hour() {
        let policy = PublishPolicy::new(Some(20));
        assert!(policy.should_publish(at(20, 0)));
        assert!(policy.should_publish(at(20, 59)));
        assert!(!policy.should_publish(at(19, 59)));
        assert!(!policy.should_publish(at(21, 0)));
    }

    #[test]
    fn test_no_hour_always_publishes() {
        let policy = PublishPolicy::default();
        assert!(policy.should_publish(at(3, 17)));
    }

    #[test]
    fn test_out_of_range_hour_is_ignored() {
        assert_eq!(PublishPolicy::new(Some(24)).hour(), None);
    }

    #[test]
    fn test_next_run() {
        let policy = PublishPolicy::new(Some(20));
        assert_eq!(policy.next_run(at(9, 30)), at(20, 0));
        assert_eq!(policy.next_run(at(20, 0)), at(20, 0) + Duration::days(1));
        assert_eq!(policy.next_run(at(22, 0)), at(20, 0) + Duration::days(1));

        let midnight = PublishPolicy::default().next_run(at(9, 30));
        assert_eq!(midnight, at(0, 0) + Duration::days(1));
    }
}
