use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};

/// whole days elapsed between two instants
///
/// clamped to zero when `end` precedes `start`, so clock skew or
/// out-of-order calls can never produce negative accrual
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    (end - start).num_days().max(0) as u32
}

/// simple (non-compounding) interest on `balance` over the whole days
/// between `from` and `to`, rounded to cents
///
/// the balance at the start of the period is used throughout; callers that
/// mutate the balance mid-period accrue up to the mutation point first
pub fn interest_for_period(
    balance: Money,
    daily_rate: Rate,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Money {
    if balance.is_zero() || daily_rate.is_zero() {
        return Money::ZERO;
    }

    let days = days_between(from, to);
    if days == 0 {
        return Money::ZERO;
    }

    let interest = balance.as_decimal() * daily_rate.as_decimal() * Decimal::from(days);
    Money::from_decimal(interest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn day_one() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_days_between() {
        let start = day_one();
        assert_eq!(days_between(start, start + Duration::days(30)), 30);
        assert_eq!(days_between(start, start + Duration::hours(47)), 1);
        assert_eq!(days_between(start, start), 0);
    }

    #[test]
    fn test_days_between_clamps_negative() {
        let start = day_one();
        assert_eq!(days_between(start, start - Duration::days(3)), 0);
        assert_eq!(days_between(start, start - Duration::hours(1)), 0);
    }

    #[test]
    fn test_interest_thirty_days() {
        let balance = Money::from_major(1_000);
        let daily = Rate::from_percentage(dec!(18.5)).daily_rate();
        let start = day_one();

        let interest = interest_for_period(balance, daily, start, start + Duration::days(30));
        assert_eq!(interest, Money::from_str_exact("15.21").unwrap());
    }

    #[test]
    fn test_interest_zero_cases() {
        let start = day_one();
        let end = start + Duration::days(30);
        let daily = Rate::from_percentage(dec!(18.5)).daily_rate();

        // zero balance
        assert_eq!(interest_for_period(Money::ZERO, daily, start, end), Money::ZERO);
        // zero rate
        assert_eq!(
            interest_for_period(Money::from_major(1_000), Rate::ZERO, start, end),
            Money::ZERO
        );
        // zero elapsed days
        assert_eq!(
            interest_for_period(Money::from_major(1_000), daily, start, start),
            Money::ZERO
        );
    }

    #[test]
    fn test_interest_partial_day_counts_as_zero() {
        let balance = Money::from_major(1_000);
        let daily = Rate::from_percentage(dec!(18.5)).daily_rate();
        let start = day_one();

        let interest = interest_for_period(balance, daily, start, start + Duration::hours(23));
        assert_eq!(interest, Money::ZERO);
    }

    #[test]
    fn test_single_day_interest() {
        // 18.25% over 365 days is an exact daily rate of 0.0005
        let balance = Money::from_major(100);
        let daily = Rate::from_percentage(dec!(18.25)).daily_rate();
        let start = day_one();

        let interest = interest_for_period(balance, daily, start, start + Duration::days(1));
        assert_eq!(interest, Money::from_str_exact("0.05").unwrap());
    }
}
