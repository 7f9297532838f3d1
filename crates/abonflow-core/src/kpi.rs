//! Admin KPI Aggregation
//!
//! Signup and revenue rollups for the admin dashboard, computed over the
//! non-admin user rows. A few dozen rows at most, so everything is a
//! plain in-memory fold.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::user::User;

/// A calendar month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthKey {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthKey {
    pub fn of(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// Dashboard label, `MM/YYYY`.
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts.year() == self.year && ts.month() == self.month
    }
}

/// The `n` calendar months ending at the month of `now`, oldest first.
pub fn trailing_months(now: DateTime<Utc>, n: usize) -> Vec<MonthKey> {
    let mut year = now.year();
    let mut month = now.month();
    let mut keys = Vec::with_capacity(n);
    for _ in 0..n {
        keys.push(MonthKey { year, month });
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    keys.reverse();
    keys
}

/// Headline figures shown on the admin dashboard
#[derive(Clone, Debug, Serialize)]
pub struct KpiSnapshot {
    /// Users currently in the paid state
    pub active_subscriptions: usize,

    /// Registrations during the current month, any status
    pub signups_this_month: usize,

    /// Payments waiting for an admin decision
    pub pending_payments: usize,

    /// Revenue from paid users registered during the current month
    pub revenue_this_month: i64,

    /// Monthly recurring revenue over all paid users
    pub mrr: i64,
}

impl KpiSnapshot {
    pub fn compute(users: &[User], now: DateTime<Utc>) -> Self {
        let this_month = MonthKey::of(now);
        let mut snapshot = Self {
            active_subscriptions: 0,
            signups_this_month: 0,
            pending_payments: 0,
            revenue_this_month: 0,
            mrr: 0,
        };
        for user in users {
            let registered_this_month = this_month.contains(user.registered_at);
            if registered_this_month {
                snapshot.signups_this_month += 1;
            }
            if user.status.is_pending() {
                snapshot.pending_payments += 1;
            }
            if user.status.is_paid() {
                snapshot.active_subscriptions += 1;
                snapshot.mrr += user.monthly_price();
                if registered_this_month {
                    snapshot.revenue_this_month += user.monthly_price();
                }
            }
        }
        snapshot
    }
}

/// Six-month trailing series for the dashboard chart, oldest month first
#[derive(Clone, Debug, Serialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub signups: Vec<usize>,
    pub revenue: Vec<i64>,
}

impl MonthlySeries {
    pub fn compute(users: &[User], now: DateTime<Utc>, months: usize) -> Self {
        let window = trailing_months(now, months);
        let mut series = Self {
            labels: Vec::with_capacity(window.len()),
            signups: Vec::with_capacity(window.len()),
            revenue: Vec::with_capacity(window.len()),
        };
        for key in window {
            let mut signups = 0;
            let mut revenue = 0;
            for user in users {
                if !key.contains(user.registered_at) {
                    continue;
                }
                signups += 1;
                if user.status.is_paid() {
                    revenue += user.monthly_price();
                }
            }
            series.labels.push(key.label());
            series.signups.push(signups);
            series.revenue.push(revenue);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;
    use crate::status::Status;
    use chrono::TimeZone;

    fn user(plan: Plan, status: Status, registered_at: DateTime<Utc>) -> User {
        User {
            id: 0,
            email: "u@exemple.fr".into(),
            password_hash: String::new(),
            status,
            plan,
            registered_at,
            is_admin: false,
            payment_proof: None,
            admin_message: None,
            custom_price: None,
        }
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_trailing_window_within_year() {
        let window = trailing_months(at(2024, 8, 15), 6);
        assert_eq!(window.first().unwrap().label(), "03/2024");
        assert_eq!(window.last().unwrap().label(), "08/2024");
    }

    #[test]
    fn test_trailing_window_across_year_boundary() {
        let window = trailing_months(at(2024, 2, 1), 6);
        let labels: Vec<_> = window.iter().map(MonthKey::label).collect();
        assert_eq!(
            labels,
            ["09/2023", "10/2023", "11/2023", "12/2023", "01/2024", "02/2024"]
        );
    }

    #[test]
    fn test_monthly_revenue_sums_paid_users_of_that_month() {
        // Two pro and one essentiel paid in March: 3300 + 3300 + 1200
        let users = vec![
            user(Plan::Pro, Status::Paye, at(2024, 3, 2)),
            user(Plan::Pro, Status::Paye, at(2024, 3, 20)),
            user(Plan::Essentiel, Status::Paye, at(2024, 3, 9)),
            // Not paid: counts as a signup but contributes no revenue
            user(Plan::Pro, Status::EnAttenteValidation, at(2024, 3, 10)),
            // Paid but in another month
            user(Plan::Pro, Status::Paye, at(2024, 2, 10)),
        ];
        let series = MonthlySeries::compute(&users, at(2024, 3, 31), 6);
        assert_eq!(series.labels.last().unwrap(), "03/2024");
        assert_eq!(*series.signups.last().unwrap(), 4);
        assert_eq!(*series.revenue.last().unwrap(), 7800);
    }

    #[test]
    fn test_snapshot_counts_and_mrr() {
        let now = at(2024, 6, 15);
        let users = vec![
            user(Plan::Pro, Status::Paye, at(2024, 6, 1)),
            user(Plan::Essentiel, Status::Paye, at(2024, 4, 1)),
            user(Plan::Essentiel, Status::EnAttenteValidation, at(2024, 6, 5)),
            user(Plan::Pro, Status::Annule, at(2024, 5, 5)),
        ];
        let snapshot = KpiSnapshot::compute(&users, now);
        assert_eq!(snapshot.active_subscriptions, 2);
        assert_eq!(snapshot.signups_this_month, 2);
        assert_eq!(snapshot.pending_payments, 1);
        assert_eq!(snapshot.revenue_this_month, 3300);
        assert_eq!(snapshot.mrr, 4500);
    }

    #[test]
    fn test_negotiated_price_feeds_mrr() {
        let mut custom = user(Plan::SurMesure, Status::Paye, at(2024, 6, 1));
        custom.custom_price = Some(5000);
        let unnegotiated = user(Plan::SurMesure, Status::Paye, at(2024, 6, 1));
        let snapshot = KpiSnapshot::compute(&[custom, unnegotiated], at(2024, 6, 15));
        assert_eq!(snapshot.mrr, 5000);
    }
}
