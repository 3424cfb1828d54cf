//! Application state shared by all handlers.

use imgvault_core::Config;
use imgvault_db::MediaRepository;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub media: MediaRepository,
    pub config: Config,
    /// Metadata database; `None` when the backend keeps no database.
    pub db_pool: Option<SqlitePool>,
}
