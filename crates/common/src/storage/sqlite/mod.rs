//! r2d2-backed SQLite pool and connection wrappers

mod connection;
mod functions;
mod pool;
mod pragmas;

pub use connection::{SqliteConnection, SqliteStatement};
pub use functions::{register_functions, CASEFOLD_FN};
pub use pool::{HealthStatus, SqlitePool};
pub use pragmas::apply_connection_pragmas;
