use std::sync::Arc;

use hotelier_core::identity::IdentityVerifier;
use hotelier_core::BookingService;
use hotelier_store::app_config::BusinessRules;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub service: BookingService,
    pub identity: Arc<dyn IdentityVerifier>,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
}
