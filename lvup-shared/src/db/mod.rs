/// Database utilities
///
/// - `pool`: connection pool construction and health checks
/// - `migrations`: embedded migration runner

pub mod migrations;
pub mod pool;
