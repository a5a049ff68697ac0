mod command;
pub mod reaction;

pub use command::*;

/// Connection pools handed to every command and query.
#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    /// Single pool for both reads and writes (CLI tools, tests).
    pub fn single(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}
