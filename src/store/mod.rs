//! Persistence layer: the single local slot holding the applicant snapshot.

pub mod file;
pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use file::FileStorage;
pub use libsql_backend::LibSqlStorage;
pub use memory::MemoryStorage;
pub use traits::ProfileStorage;
