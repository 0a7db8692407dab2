use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("entity-relationship JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which end of a relationship failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// A relationship names an entity or property that is not in the entity dictionary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("relationship #{relationship}: {side} entity `{entity}` does not exist")]
    UnknownEntity {
        relationship: usize,
        side: Side,
        entity: String,
    },

    #[error("relationship #{relationship}: {side} property `{entity}.{property}` does not exist")]
    UnknownProperty {
        relationship: usize,
        side: Side,
        entity: String,
        property: String,
    },
}

impl ReferenceError {
    /// Index of the offending relationship in input order.
    pub fn relationship(&self) -> usize {
        match self {
            ReferenceError::UnknownEntity { relationship, .. }
            | ReferenceError::UnknownProperty { relationship, .. } => *relationship,
        }
    }
}
