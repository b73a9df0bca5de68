//! Store-assigned integer identifiers.
//!
//! Every entity is keyed by a positive `i32` handed out by its store. The
//! newtypes keep student, course and registration keys from being mixed up at
//! call sites.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation error for identifiers that are zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{entity} id must be a positive integer, got {value}")]
pub struct IdentifierError {
    entity: &'static str,
    value: i64,
}

impl IdentifierError {
    /// Name of the entity the identifier belongs to.
    #[must_use]
    pub fn entity(&self) -> &'static str {
        self.entity
    }
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(try_from = "i64", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i32) -> Result<Self, IdentifierError> {
                Self::try_from(i64::from(value))
            }

            /// Raw integer value as stored.
            #[must_use]
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdentifierError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match i32::try_from(value) {
                    Ok(raw) if raw > 0 => Ok(Self(raw)),
                    _ => Err(IdentifierError {
                        entity: $entity,
                        value,
                    }),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_identifier!(
    /// Identifier of a [`Student`](super::Student).
    StudentId,
    "student"
);
define_identifier!(
    /// Identifier of a [`Course`](super::Course).
    CourseId,
    "course"
);
define_identifier!(
    /// Identifier of a [`Registration`](super::Registration).
    RegistrationId,
    "registration"
);

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i32::MIN)]
    fn rejects_non_positive_values(#[case] raw: i32) {
        let err = StudentId::new(raw).expect_err("non-positive ids are rejected");
        assert_eq!(err.entity(), "student");
    }

    #[rstest]
    fn accepts_positive_values() {
        let id = CourseId::new(42).expect("positive id");
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[rstest]
    #[case("7", true)]
    #[case("0", false)]
    #[case("-3", false)]
    #[case("4294967296", false)]
    fn deserialises_only_positive_i32(#[case] raw: &str, #[case] ok: bool) {
        let parsed: Result<RegistrationId, _> = serde_json::from_str(raw);
        assert_eq!(parsed.is_ok(), ok);
    }

    #[rstest]
    fn serialises_as_bare_integer() {
        let id = StudentId::new(5).expect("positive id");
        assert_eq!(serde_json::to_string(&id).expect("serialises"), "5");
    }
}
