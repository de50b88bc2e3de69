//! Account module for Bubble Cleaner

pub mod flows;
pub mod types;
pub mod validation;

pub use flows::{
    AuthService, EmailVerification, VerificationState, RESENT_MESSAGE, VERIFIED_MESSAGE,
};
pub use types::{LoginRequest, RegisterRequest, TokenResponse, VerifiedAccount};
pub use validation::{
    extract_verification_token, LoginForm, RegistrationForm, ValidationError, MIN_PASSWORD_LEN,
    MIN_USERNAME_LEN,
};
