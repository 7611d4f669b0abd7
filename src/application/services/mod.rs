mod authentication_service;

pub use authentication_service::{
    AuthFailure, AuthServiceError, AuthenticationService, EnrollmentOutcome, VerificationOutcome,
};
