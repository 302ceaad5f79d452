use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::{QuotaDecision, QuotaGate};

#[derive(Debug)]
struct QuotaWindow {
    day: NaiveDate,
    used: u32,
}

/// Daily request budget for the external product search.
///
/// The check and the increment happen under one lock, so concurrent callers
/// can never overshoot the limit. The counter resets when the UTC day changes.
#[derive(Debug)]
pub struct DailyQuota {
    limit: u32,
    window: Mutex<QuotaWindow>,
}

impl DailyQuota {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            window: Mutex::new(QuotaWindow {
                day: Utc::now().date_naive(),
                used: 0,
            }),
        }
    }

    pub fn try_acquire(&self) -> QuotaDecision {
        self.try_acquire_on(Utc::now().date_naive())
    }

    pub fn try_acquire_on(&self, today: NaiveDate) -> QuotaDecision {
        let Ok(mut window) = self.window.lock() else {
            return QuotaDecision::deny("quota tracker unavailable");
        };

        if window.day != today {
            window.day = today;
            window.used = 0;
        }

        if window.used >= self.limit {
            return QuotaDecision::deny(format!("daily limit of {} requests reached", self.limit));
        }

        window.used += 1;
        QuotaDecision::allow()
    }

    pub fn used(&self) -> u32 {
        self.window.lock().map(|w| w.used).unwrap_or(self.limit)
    }
}

#[async_trait]
impl QuotaGate for DailyQuota {
    async fn should_make_api_request(&self) -> anyhow::Result<QuotaDecision> {
        Ok(self.try_acquire())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_limit_and_daily_reset() {
        let quota = DailyQuota::new(2);
        let monday = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        let tuesday = monday.succ_opt().unwrap();

        assert!(quota.try_acquire_on(monday).allowed);
        assert!(quota.try_acquire_on(monday).allowed);

        let denied = quota.try_acquire_on(monday);
        assert!(!denied.allowed);
        assert!(denied.reason.is_some());

        assert!(quota.try_acquire_on(tuesday).allowed);
        assert_eq!(quota.used(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_never_exceed_limit() -> anyhow::Result<()> {
        let quota = Arc::new(DailyQuota::new(25));

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let quota = quota.clone();
                tokio::spawn(async move { quota.should_make_api_request().await })
            })
            .collect();

        let mut allowed = 0;
        for handle in handles {
            if handle.await??.allowed {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 25);
        assert_eq!(quota.used(), 25);
        Ok(())
    }
}
