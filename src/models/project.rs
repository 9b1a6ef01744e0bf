//! Project model.

use serde::{Deserialize, Serialize};

use super::{Lifecycle, LifecycleWindow};

/// A project carried out under a contract.
///
/// # Example
///
/// ```
/// use tuttle::models::{Lifecycle, LifecycleWindow, Project};
/// use chrono::NaiveDate;
///
/// let window = LifecycleWindow::new(
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
///     false,
/// )
/// .unwrap();
/// let project = Project::new("Website relaunch", "#relaunch", "Backend work", window);
///
/// assert!(project.is_upcoming(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Short title of the project.
    pub title: String,
    /// Unique tag used to attribute tracked time to the project.
    pub tag: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Title of the contract the project is billed under.
    pub contract: String,
    /// The project's start/end dates and completion flag.
    pub window: LifecycleWindow,
}

impl Project {
    /// Creates a project with an empty description.
    pub fn new(
        title: impl Into<String>,
        tag: impl Into<String>,
        contract: impl Into<String>,
        window: LifecycleWindow,
    ) -> Self {
        Self {
            title: title.into(),
            tag: tag.into(),
            description: String::new(),
            contract: contract.into(),
            window,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the project as complete.
    pub fn mark_completed(&mut self) {
        self.window.mark_completed();
    }
}

impl Lifecycle for Project {
    fn window(&self) -> &LifecycleWindow {
        &self.window
    }
}
