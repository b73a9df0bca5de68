//! Builders for the HTTP state over memory or database stores.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use registrar::domain::IntegrityGate;
use registrar::domain::ports::PasswordHasher;
use registrar::inbound::http::state::{HttpState, StorePorts};
use registrar::outbound::crypto::Argon2PasswordHasher;
use registrar::outbound::persistence::{
    DieselCourseRepository, DieselRegistrationRepository, DieselStudentRepository,
};

use super::ServerConfig;

/// Wire the domain services over the stores selected by `config`.
///
/// A configured pool selects the Diesel adapters; otherwise every store
/// lives in process memory.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let gate = IntegrityGate::for_mode(config.serialized_integrity);
    let state = match &config.db_pool {
        Some(pool) => {
            info!(serialized = gate.is_serialized(), "using PostgreSQL stores");
            HttpState::from_stores(
                StorePorts {
                    students: Arc::new(DieselStudentRepository::new(pool.clone())),
                    courses: Arc::new(DieselCourseRepository::new(pool.clone())),
                    registrations: Arc::new(DieselRegistrationRepository::new(pool.clone())),
                },
                hasher,
                gate,
            )
        }
        None => {
            info!(serialized = gate.is_serialized(), "using in-memory stores");
            HttpState::in_memory(hasher, gate)
        }
    };
    web::Data::new(state)
}
