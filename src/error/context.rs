//! Error context for enriched error information.
//!
//! Services attach a context naming the operation and the record it touched,
//! so the log line for an opaque 500 still says what was being attempted.

use std::fmt;

use crate::models::Entity;

/// Which service call failed, and on what.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    pub operation: String,
    pub entity: Option<Entity>,
    /// Set when the operation targets a single record.
    pub record_id: Option<i64>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            entity: None,
            record_id: None,
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_record_id(mut self, id: i64) -> Self {
        self.record_id = Some(id);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.operation)?;
        match (self.entity, self.record_id) {
            (Some(entity), Some(id)) => write!(f, " {}={}", entity, id),
            (Some(entity), None) => write!(f, " {}", entity),
            (None, Some(id)) => write!(f, " id={}", id),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new("increment_view")
            .with_entity(Entity::Folder)
            .with_record_id(3);
        assert_eq!(ctx.to_string(), "[increment_view] folder=3");

        assert_eq!(ErrorContext::new("list_cars").to_string(), "[list_cars]");
        assert_eq!(
            ErrorContext::new("list_cars")
                .with_entity(Entity::Car)
                .to_string(),
            "[list_cars] car"
        );
        assert_eq!(
            ErrorContext::new("get").with_record_id(9).to_string(),
            "[get] id=9"
        );
    }
}
