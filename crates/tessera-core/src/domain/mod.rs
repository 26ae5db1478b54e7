//! Domain entities for Tessera.

mod user;

pub use user::User;
