//! Task types and the catalog they are picked from.

use serde::{Deserialize, Serialize};

use crate::error::EssayError;

/// A named exam-task template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskType {
    /// Display label.
    pub name: String,
    /// Minimum number of words the answer should reach.
    pub min_words_count: u32,
    /// Time allotted for the task.
    pub expected_time_in_minutes: u32,
}

impl TaskType {
    /// Create a task type.
    #[must_use]
    pub fn new(name: impl Into<String>, min_words_count: u32, expected_time_in_minutes: u32) -> Self {
        Self {
            name: name.into(),
            min_words_count,
            expected_time_in_minutes,
        }
    }

    /// The allotted time in seconds.
    #[must_use]
    pub fn expected_seconds(&self) -> i64 {
        i64::from(self.expected_time_in_minutes) * 60
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} words, {} min)",
            self.name, self.min_words_count, self.expected_time_in_minutes
        )
    }
}

/// The ordered list of task types a session can use.
///
/// Never empty; the first entry is the default for new sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaskType>", into = "Vec<TaskType>")]
pub struct TaskCatalog {
    task_types: Vec<TaskType>,
}

impl TaskCatalog {
    /// Build a catalog.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::Config` if the list is empty or a task type has
    /// no allotted time.
    pub fn new(task_types: Vec<TaskType>) -> Result<Self, EssayError> {
        if task_types.is_empty() {
            return Err(EssayError::Config(
                "task type catalog must contain at least one entry".to_string(),
            ));
        }

        if let Some(bad) = task_types.iter().find(|t| t.expected_time_in_minutes == 0) {
            return Err(EssayError::Config(format!(
                "task type \"{}\" must allow at least one minute",
                bad.name
            )));
        }

        Ok(Self { task_types })
    }

    /// The IELTS writing tasks.
    #[must_use]
    pub fn ielts() -> Self {
        Self {
            task_types: vec![
                TaskType::new("IELTS General Task 1", 150, 20),
                TaskType::new("IELTS General Task 2", 250, 40),
                TaskType::new("IELTS Academic Task 1", 150, 20),
                TaskType::new("IELTS Academic Task 2", 250, 40),
            ],
        }
    }

    /// The task type new sessions start with.
    #[must_use]
    pub fn default_task(&self) -> &TaskType {
        // The constructor rejects empty lists
        &self.task_types[0]
    }

    /// Look up a task type by 1-based position or by name (case-insensitive).
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&TaskType> {
        let key = key.trim();

        if let Ok(position) = key.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| self.task_types.get(index));
        }

        self.task_types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(key))
    }

    /// Position of `task_type` in the catalog, if present.
    #[must_use]
    pub fn position(&self, task_type: &TaskType) -> Option<usize> {
        self.task_types.iter().position(|t| t == task_type)
    }

    /// The task type after `current`, wrapping around.
    ///
    /// A task type that is not in the catalog is followed by the default.
    #[must_use]
    pub fn next_after(&self, current: &TaskType) -> &TaskType {
        match self.position(current) {
            Some(index) => &self.task_types[(index + 1) % self.task_types.len()],
            None => self.default_task(),
        }
    }

    /// Iterate over the task types in order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskType> {
        self.task_types.iter()
    }

    /// Number of task types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_types.len()
    }

    /// Whether the catalog has no task types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_types.is_empty()
    }
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::ielts()
    }
}

impl TryFrom<Vec<TaskType>> for TaskCatalog {
    type Error = EssayError;

    fn try_from(task_types: Vec<TaskType>) -> Result<Self, Self::Error> {
        Self::new(task_types)
    }
}

impl From<TaskCatalog> for Vec<TaskType> {
    fn from(catalog: TaskCatalog) -> Self {
        catalog.task_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ielts_catalog() {
        let catalog = TaskCatalog::ielts();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.default_task().name, "IELTS General Task 1");
        assert_eq!(catalog.default_task().min_words_count, 150);
        assert_eq!(catalog.default_task().expected_seconds(), 1200);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            TaskCatalog::new(Vec::new()),
            Err(EssayError::Config(_))
        ));
    }

    #[test]
    fn test_zero_minutes_rejected() {
        let result = TaskCatalog::new(vec![TaskType::new("Sprint", 50, 0)]);
        assert!(matches!(result, Err(EssayError::Config(_))));
    }

    #[test]
    fn test_find_by_position_and_name() {
        let catalog = TaskCatalog::ielts();
        assert_eq!(catalog.find("2").unwrap().name, "IELTS General Task 2");
        assert_eq!(
            catalog.find("ielts academic task 1").unwrap().name,
            "IELTS Academic Task 1"
        );
        assert!(catalog.find("0").is_none());
        assert!(catalog.find("5").is_none());
        assert!(catalog.find("TOEFL").is_none());
    }

    #[test]
    fn test_next_after_wraps() {
        let catalog = TaskCatalog::ielts();
        let last = catalog.find("4").unwrap().clone();
        assert_eq!(catalog.next_after(&last), catalog.default_task());

        let stranger = TaskType::new("Custom", 100, 10);
        assert_eq!(catalog.next_after(&stranger), catalog.default_task());
    }

    #[test]
    fn test_display() {
        let task = TaskType::new("IELTS General Task 2", 250, 40);
        assert_eq!(task.to_string(), "IELTS General Task 2 (250 words, 40 min)");
    }

    #[test]
    fn test_deserialize_rejects_empty_list() {
        let result: Result<TaskCatalog, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
