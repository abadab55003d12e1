use chrono::{Days, NaiveDate};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Days emitted per year. Leap years lose Dec 31; the calendar is fixed-length.
pub const DAYS_PER_YEAR: u64 = 365;

/// year => its dates, built once per run
static CALENDAR_CACHE: Lazy<Cache<i32, Arc<Vec<NaiveDate>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(16)
        .build()
});

/// Dates from Jan 1 of `year` onwards, one per day, `DAYS_PER_YEAR` of them.
///
/// Returns an empty calendar for years chrono cannot represent.
pub fn year_dates(year: i32) -> Vec<NaiveDate> {
    let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };

    (0..DAYS_PER_YEAR)
        .map_while(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}

/// Whether every one of the `DAYS_PER_YEAR` dates of `year` is representable.
pub fn is_supported_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|start| start.checked_add_days(Days::new(DAYS_PER_YEAR - 1)))
        .is_some()
}

/// Memoized [`year_dates`].
pub async fn calendar_for(year: i32) -> Arc<Vec<NaiveDate>> {
    CALENDAR_CACHE
        .get_with(year, async move {
            let dates = year_dates(year);
            tracing::debug!(year, days = dates.len(), "Calendar built");
            Arc::new(dates)
        })
        .await
}
