//! Course data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CourseId;
use super::student::NAME_MAX;

/// Maximum length, in characters, of a course description.
pub const DESCRIPTION_MAX: usize = 2000;

/// Validation errors returned by the course value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
}

impl CourseValidationError {
    /// Payload field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
        }
    }
}

/// Course title, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Distributed Systems")]
pub struct CourseTitle(String);

impl CourseTitle {
    /// Validate and construct a [`CourseTitle`].
    pub fn new(title: impl AsRef<str>) -> Result<Self, CourseValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(CourseValidationError::TitleTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CourseTitle {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseTitle> for String {
    fn from(value: CourseTitle) -> Self {
        value.0
    }
}

/// Free-text course description. Kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String)]
pub struct CourseDescription(String);

impl CourseDescription {
    /// Validate and construct a [`CourseDescription`].
    pub fn new(description: impl Into<String>) -> Result<Self, CourseValidationError> {
        let description = description.into();
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(CourseValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(description))
    }

    /// Borrow the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for CourseDescription {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseDescription> for String {
    fn from(value: CourseDescription) -> Self {
        value.0
    }
}

/// Values required to insert or overwrite a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: CourseTitle,
    pub description: Option<CourseDescription>,
}

/// Persisted course record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: CourseTitle,
    description: Option<CourseDescription>,
}

impl Course {
    /// Combine a store-assigned id with the draft values.
    #[must_use]
    pub fn from_draft(id: CourseId, draft: CourseDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Course title.
    #[must_use]
    pub fn title(&self) -> &CourseTitle {
        &self.title
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&CourseDescription> {
        self.description.as_ref()
    }
}
