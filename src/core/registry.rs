//! Registry of categories that get a data page

use std::sync::{PoisonError, RwLock};

/// Categories known to the UI.
///
/// Starts empty and is replaced wholesale by the front end. Routing only reads
/// it; the registry does not gate which categories can hold data.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    categories: RwLock<Vec<String>>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list
    pub fn replace(&self, categories: Vec<String>) {
        *self
            .categories
            .write()
            .unwrap_or_else(PoisonError::into_inner) = categories;
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|c| c == category)
    }

    pub fn list(&self) -> Vec<String> {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let registry = CategoryRegistry::new();
        assert!(registry.list().is_empty());
        assert!(!registry.contains("parts"));
    }

    #[test]
    fn test_replace_overwrites() {
        let registry = CategoryRegistry::new();
        registry.replace(vec!["parts".to_string(), "tools".to_string()]);
        assert!(registry.contains("parts"));

        registry.replace(vec!["tools".to_string()]);
        assert!(!registry.contains("parts"));
        assert_eq!(registry.list(), vec!["tools".to_string()]);
    }

    #[test]
    fn test_contains_is_exact() {
        let registry = CategoryRegistry::new();
        registry.replace(vec!["Parts".to_string()]);
        assert!(!registry.contains("parts"));
        assert!(!registry.contains("Part"));
    }
}
