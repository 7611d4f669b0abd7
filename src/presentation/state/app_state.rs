use std::sync::Arc;

use crate::application::services::AuthenticationService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthenticationService>,
}
