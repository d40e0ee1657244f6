//! Error types for the data model

/// Errors raised when constructing or mutating model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Rating score outside 0..=5
    #[error("rating out of range: {value} (max {max})")]
    RatingOutOfRange { value: u8, max: u8 },

    /// Unknown rating dimension name
    #[error("unknown rating dimension: '{0}'")]
    UnknownDimension(String),

    /// Unknown role name
    #[error("unknown role: '{0}'")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_out_of_range_display() {
        let err = ModelError::RatingOutOfRange { value: 7, max: 5 };
        assert_eq!(err.to_string(), "rating out of range: 7 (max 5)");
    }

    #[test]
    fn unknown_dimension_display() {
        let err = ModelError::UnknownDimension("clarity".to_string());
        assert_eq!(err.to_string(), "unknown rating dimension: 'clarity'");
    }
}
