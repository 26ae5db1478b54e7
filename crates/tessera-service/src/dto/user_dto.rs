//! User-related DTOs.

use serde::{Deserialize, Serialize};
use tessera_core::validation::rules::{not_blank, positive_id};
use tessera_core::{User, UserId};
use validator::Validate;

/// Transport-shaped copy of a [`User`].
///
/// Used both as the request body of create/update and as the response of
/// every read. Conversion to and from [`User`] is a direct field copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "positive_id", message = "Id must be positive"))]
    pub id: Option<UserId>,

    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "not_blank", message = "Name must not be blank")
    )]
    pub name: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: String,
}

impl UserDto {
    /// Creates a DTO without an id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns a copy of this DTO carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
        }
    }
}
