//! # Tessera Repository
//!
//! Data access layer for user records.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository | InMemoryUserRepository
//!   ↓
//! MySQL (SQLx)
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::InMemoryUserRepository;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
