pub mod postgres;
pub mod registry;
pub mod sqlite;

pub use postgres::PostgresDbProvider;
pub use registry::{DbProvider, DbProviderId, DbProviders};
pub use sqlite::SqliteDbProvider;
