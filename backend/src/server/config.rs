//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use registrar::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) serialized_integrity: bool,
}

impl ServerConfig {
    /// Configuration listening on `bind_addr` with in-memory stores.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            serialized_integrity: false,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, students, courses and registrations are stored in
    /// PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Order guarded deletes against registration creation.
    #[must_use]
    pub fn with_serialized_integrity(mut self, serialized: bool) -> Self {
        self.serialized_integrity = serialized;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
