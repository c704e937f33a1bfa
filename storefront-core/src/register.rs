//! Account registration: form checks before anything is sent, then `POST /auth/register`.

use storefront_types::wire::RegisterRequest;

use crate::api::{ApiError, Request, StorefrontApi, Transport, expect_success};
use crate::notifications::{BACKEND_UNREACHABLE, Notification, NotificationSink, REGISTERED};

pub const MIN_USERNAME_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// The first problem found with a registration form. Messages are shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username is a required field")]
    MissingUsername,
    #[error("Username must be at least 6 characters")]
    UsernameTooShort,
    #[error("Password is a required field")]
    MissingPassword,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationError> {
    if form.username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    if form.username.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    if form.password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered,
    Invalid(ValidationError),
    Failed(ApiError),
}

impl<T: Transport> StorefrontApi<T> {
    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .send(Request::post("/auth/register", request)?)
            .await?;
        expect_success(response)
            .inspect_err(|e| log::warn!("Registration for {} failed: {e}", request.username))
    }
}

/// Validate `form` and, if it passes, register the account. Every outcome is also reported to
/// `sink`.
pub async fn register<T: Transport>(
    api: &StorefrontApi<T>,
    sink: &dyn NotificationSink,
    form: &RegistrationForm,
) -> RegistrationOutcome {
    if let Err(invalid) = validate_registration(form) {
        sink.notify(Notification::warning(invalid.to_string()));
        return RegistrationOutcome::Invalid(invalid);
    }

    let request = RegisterRequest {
        username: form.username.clone(),
        password: form.password.clone(),
    };
    match api.register(&request).await {
        Ok(()) => {
            sink.notify(Notification::success(REGISTERED));
            RegistrationOutcome::Registered
        }
        Err(error) => {
            // only a 400 carries a message worth showing here
            let message = match &error {
                ApiError::Rejected {
                    status: 400,
                    message,
                } => message.as_str(),
                _ => BACKEND_UNREACHABLE,
            };
            sink.notify(Notification::error(message));
            RegistrationOutcome::Failed(error)
        }
    }
}
