//! Name filtering for list requests.

use super::types::Student;

/// Case-sensitive prefix filter applied to student names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    prefix: Option<String>,
}

impl NameFilter {
    /// Filter that keeps every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from an optional query value. Empty prefixes match everything.
    pub fn from_prefix(prefix: Option<String>) -> Self {
        Self {
            prefix: prefix.filter(|value| !value.is_empty()),
        }
    }

    /// Active prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Whether `student` passes the filter.
    pub fn matches(&self, student: &Student) -> bool {
        match &self.prefix {
            Some(prefix) => student.name.starts_with(prefix.as_str()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prefix_is_treated_as_absent() {
        let filter = NameFilter::from_prefix(Some(String::new()));
        assert_eq!(filter, NameFilter::all());
        assert!(filter.matches(&Student::new(1, "anyone")));
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let filter = NameFilter::from_prefix(Some("Car".into()));
        assert!(filter.matches(&Student::new(3, "Carla")));
        assert!(filter.matches(&Student::new(4, "Caroline")));
        assert!(!filter.matches(&Student::new(5, "carmen")));
        assert!(!filter.matches(&Student::new(6, "Oscar")));
    }
}
