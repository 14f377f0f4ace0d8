// ============================================================================
// spark-collection - Errors
// ============================================================================

// =============================================================================
// COLLECTION ERROR
// =============================================================================

/// Error returned by fallible collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// `reduce` was called on an empty collection without a seed value
    EmptyReduce,
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionError::EmptyReduce => {
                write!(f, "cannot reduce an empty collection with no initial value")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_seed() {
        let msg = CollectionError::EmptyReduce.to_string();
        assert!(msg.contains("empty collection"));
        assert!(msg.contains("initial value"));
    }

    #[test]
    fn usable_as_boxed_error() {
        let err: Box<dyn std::error::Error> = Box::new(CollectionError::EmptyReduce);
        assert_eq!(
            err.to_string(),
            "cannot reduce an empty collection with no initial value"
        );
    }
}
