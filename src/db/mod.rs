//! Database layer: pool and the user store for PostgreSQL.

mod pool;
mod repositories;

pub use pool::{create_pool, DbPool};
pub use repositories::{PgUserStore, UserRow, UserStore};
