//! Lifecycle window and status types.
//!
//! This module defines the [`LifecycleWindow`] shared by contracts and
//! projects, the [`Status`] it classifies into, and the [`Lifecycle`] trait
//! that lets both entity kinds be classified and filtered the same way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{classify_lifecycle_with, is_active, is_upcoming};
use crate::error::{TuttleError, TuttleResult};

/// The lifecycle status of a contract or project relative to a given day.
///
/// `All` is both the "no filter" label used when listing entities and the
/// fallback reported when none of the other statuses apply.
///
/// # Example
///
/// ```
/// use tuttle::models::Status;
///
/// assert_eq!(Status::Upcoming.to_string(), "Upcoming");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The window's end date lies after today.
    Active,
    /// The window's start date lies after today.
    Upcoming,
    /// The entity has been marked as complete.
    Completed,
    /// No specific status applies.
    All,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Active => write!(f, "Active"),
            Status::Upcoming => write!(f, "Upcoming"),
            Status::Completed => write!(f, "Completed"),
            Status::All => write!(f, "All"),
        }
    }
}

/// Which date rule is evaluated first when classifying a window.
///
/// The active and upcoming rules overlap: a window that has not started yet
/// also ends after today. `EndDateFirst` reports such windows as active,
/// `StartDateFirst` reports them as upcoming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPriority {
    /// Test `end_date > today` before `start_date > today`.
    #[default]
    EndDateFirst,
    /// Test `start_date > today` before `end_date > today`.
    StartDateFirst,
}

/// The start/end dates and completion flag of a contract or project.
///
/// Windows are validated on construction: the end date may equal the start
/// date (a one-day window) but never precede it. Deserialization runs the
/// same check.
///
/// # Example
///
/// ```
/// use tuttle::models::{LifecycleWindow, Status, StatusPriority};
/// use chrono::NaiveDate;
///
/// let window = LifecycleWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     false,
/// )
/// .unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(window.status(today, StatusPriority::EndDateFirst), Status::Active);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LifecycleWindowFields")]
pub struct LifecycleWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_completed: bool,
}

#[derive(Deserialize)]
struct LifecycleWindowFields {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    is_completed: bool,
}

impl TryFrom<LifecycleWindowFields> for LifecycleWindow {
    type Error = TuttleError;

    fn try_from(fields: LifecycleWindowFields) -> TuttleResult<Self> {
        Self::new(fields.start_date, fields.end_date, fields.is_completed)
    }
}

impl LifecycleWindow {
    /// Creates a window, rejecting one whose end date precedes its start date.
    ///
    /// # Errors
    ///
    /// Returns [`TuttleError::InvalidLifecycleWindow`] when `end_date < start_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, is_completed: bool) -> TuttleResult<Self> {
        if end_date < start_date {
            return Err(TuttleError::InvalidLifecycleWindow {
                start_date,
                end_date,
            });
        }

        Ok(Self {
            start_date,
            end_date,
            is_completed,
        })
    }

    /// Returns the first day of the window.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of the window.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns true if the entity has been marked as complete.
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Marks the entity as complete. The dates are left untouched.
    pub fn mark_completed(&mut self) {
        self.is_completed = true;
    }

    /// Returns true if the window ends after `today`.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        is_active(self.end_date, today)
    }

    /// Returns true if the window starts after `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        is_upcoming(self.start_date, today)
    }

    /// Classifies the window relative to `today`.
    pub fn status(&self, today: NaiveDate, priority: StatusPriority) -> Status {
        classify_lifecycle_with(
            self.start_date,
            self.end_date,
            self.is_completed,
            today,
            priority,
        )
    }
}

/// An entity whose status is derived from a [`LifecycleWindow`].
///
/// Implemented by [`Contract`](super::Contract) and [`Project`](super::Project)
/// so that both are classified and filtered by the same rules.
pub trait Lifecycle {
    /// Returns the entity's lifecycle window.
    fn window(&self) -> &LifecycleWindow;

    /// Returns true if the entity ends after `today`.
    fn is_active(&self, today: NaiveDate) -> bool {
        self.window().is_active(today)
    }

    /// Returns true if the entity starts after `today`.
    fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.window().is_upcoming(today)
    }

    /// Returns true if the entity has been marked as complete.
    fn is_completed(&self) -> bool {
        self.window().is_completed()
    }

    /// Classifies the entity relative to `today`.
    fn status(&self, today: NaiveDate, priority: StatusPriority) -> Status {
        self.window().status(today, priority)
    }
}

impl Lifecycle for LifecycleWindow {
    fn window(&self) -> &LifecycleWindow {
        self
    }
}
