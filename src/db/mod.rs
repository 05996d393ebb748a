//! PostgreSQL access: the async pool used by repositories and the embedded
//! migrations used by `turing-shop migrate`.

mod migrate;
mod pool;

pub use migrate::{MIGRATIONS, pending_migrations, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, establish_async_connection_pool, lazy_connection_pool};
