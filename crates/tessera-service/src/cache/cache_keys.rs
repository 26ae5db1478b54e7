//! Cache key generators for consistent key naming.

use tessera_core::UserId;

/// Group holding single-user entries.
pub const USERS_CACHE: &str = "users";

/// Group holding the aggregate user list.
pub const ALL_USERS_CACHE: &str = "allUsers";

/// Separator between a group name and the key within it.
pub const GROUP_SEPARATOR: &str = "::";

/// Key of the aggregate list entry within its group.
///
/// The list operation takes no arguments, so it always maps to the same
/// empty composite key.
const EMPTY_KEY: &str = "SimpleKey []";

/// Generate a key within a cache group.
#[must_use]
pub fn grouped(group: &str, key: &str) -> String {
    format!("{}{}{}", group, GROUP_SEPARATOR, key)
}

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    grouped(USERS_CACHE, &id.to_string())
}

/// Generate the cache key of the aggregate user list.
#[must_use]
pub fn all_users() -> String {
    grouped(ALL_USERS_CACHE, EMPTY_KEY)
}

/// Pattern matching every key of a cache group.
#[must_use]
pub fn group_pattern(group: &str) -> String {
    format!("{}{}*", group, GROUP_SEPARATOR)
}
