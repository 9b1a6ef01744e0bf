//! Lifecycle status classification.
//!
//! This module decides whether a contract or project is active, upcoming or
//! completed on a given day, and filters collections of such entities by
//! status. All functions take `today` explicitly so results are deterministic.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Lifecycle, Status, StatusPriority};

/// Returns true if a window ending on `end_date` is still running after `today`.
///
/// A window ending today is no longer active.
///
/// # Example
///
/// ```
/// use tuttle::calculation::is_active;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert!(is_active(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(), today));
/// assert!(!is_active(today, today));
/// ```
pub fn is_active(end_date: NaiveDate, today: NaiveDate) -> bool {
    end_date > today
}

/// Returns true if a window starting on `start_date` has not begun by `today`.
///
/// A window starting today is no longer upcoming.
///
/// # Example
///
/// ```
/// use tuttle::calculation::is_upcoming;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert!(is_upcoming(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(), today));
/// assert!(!is_upcoming(today, today));
/// ```
pub fn is_upcoming(start_date: NaiveDate, today: NaiveDate) -> bool {
    start_date > today
}

/// Classifies a lifecycle window, testing the end date first.
///
/// Rules are applied in order and the first match wins:
///
/// 1. `end_date > today` gives [`Status::Active`]
/// 2. `start_date > today` gives [`Status::Upcoming`]
/// 3. `is_completed` gives [`Status::Completed`]
/// 4. otherwise [`Status::All`]
///
/// Because rule 1 is checked first, a window that has not started yet is
/// reported as active. Use [`classify_lifecycle_with`] and
/// [`StatusPriority::StartDateFirst`] to report it as upcoming instead.
///
/// # Example
///
/// ```
/// use tuttle::calculation::classify_lifecycle;
/// use tuttle::models::Status;
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let today = d(2024, 6, 15);
///
/// assert_eq!(classify_lifecycle(d(2024, 1, 1), d(2024, 12, 31), false, today), Status::Active);
/// assert_eq!(classify_lifecycle(d(2023, 1, 1), d(2023, 12, 31), true, today), Status::Completed);
/// assert_eq!(classify_lifecycle(d(2023, 1, 1), d(2023, 12, 31), false, today), Status::All);
/// ```
pub fn classify_lifecycle(
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_completed: bool,
    today: NaiveDate,
) -> Status {
    classify_lifecycle_with(
        start_date,
        end_date,
        is_completed,
        today,
        StatusPriority::EndDateFirst,
    )
}

/// Classifies a lifecycle window with an explicit rule order.
///
/// With [`StatusPriority::EndDateFirst`] this is [`classify_lifecycle`].
/// With [`StatusPriority::StartDateFirst`] the upcoming rule is tested
/// before the active rule; the completion rule and the fallback are
/// unchanged.
///
/// The dates are not validated here; an inverted window (`end < start`) is
/// classified by the same rules.
pub fn classify_lifecycle_with(
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_completed: bool,
    today: NaiveDate,
    priority: StatusPriority,
) -> Status {
    let active = is_active(end_date, today);
    let upcoming = is_upcoming(start_date, today);

    match priority {
        StatusPriority::EndDateFirst if active => Status::Active,
        StatusPriority::EndDateFirst if upcoming => Status::Upcoming,
        StatusPriority::StartDateFirst if upcoming => Status::Upcoming,
        StatusPriority::StartDateFirst if active => Status::Active,
        _ if is_completed => Status::Completed,
        _ => Status::All,
    }
}

/// Returns the items matching a status filter.
///
/// Each filter tests a single rule, independently of the others:
///
/// - [`Status::Active`] keeps items with `is_active(today)`
/// - [`Status::Upcoming`] keeps items with `is_upcoming(today)`
/// - [`Status::Completed`] keeps items marked complete
/// - [`Status::All`] keeps everything
///
/// An item can therefore appear under more than one filter.
///
/// # Example
///
/// ```
/// use tuttle::calculation::filter_by_status;
/// use tuttle::models::{LifecycleWindow, Status};
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let windows = vec![
///     LifecycleWindow::new(d(2024, 1, 1), d(2024, 12, 31), false).unwrap(),
///     LifecycleWindow::new(d(2023, 1, 1), d(2023, 12, 31), true).unwrap(),
/// ];
///
/// let active = filter_by_status(&windows, Status::Active, d(2024, 6, 15));
/// assert_eq!(active.len(), 1);
/// ```
pub fn filter_by_status<T: Lifecycle>(items: &[T], status: Status, today: NaiveDate) -> Vec<&T> {
    items
        .iter()
        .filter(|item| match status {
            Status::Active => item.is_active(today),
            Status::Upcoming => item.is_upcoming(today),
            Status::Completed => item.is_completed(),
            Status::All => true,
        })
        .collect()
}

/// Counts items by their classified status.
///
/// Unlike [`filter_by_status`], every item is counted exactly once.
pub fn count_by_status<T: Lifecycle>(
    items: &[T],
    today: NaiveDate,
    priority: StatusPriority,
) -> HashMap<Status, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.status(today, priority)).or_insert(0) += 1;
    }
    counts
}
