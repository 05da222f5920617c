use crate::api::{ApiClient, Transport};
use crate::error::AppError;
use crate::session::{Session, SessionController};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials were accepted and persisted.
    LoggedIn(Session),
    /// The account was created; the form should switch to login.
    Registered,
}

pub const REGISTERED_NOTICE: &str = "Account created. You can log in now.";

/// Submits the auth form. Validation runs first and fails without touching
/// the network; on a successful login the credentials are handed to the
/// session controller.
pub async fn submit<T: Transport>(
    mode: AuthMode,
    email: &str,
    password: &str,
    api: &ApiClient<T>,
    sessions: &SessionController,
) -> Result<AuthOutcome, AppError> {
    let email = validate::email(email)?;
    validate::password(password)?;

    match mode {
        AuthMode::Register => {
            api.register(&email, password).await?;
            log::info!("registered {email}");
            Ok(AuthOutcome::Registered)
        }
        AuthMode::Login => {
            let credentials = api.login(&email, password).await?;
            let session = sessions.login(credentials)?;
            Ok(AuthOutcome::LoggedIn(session))
        }
    }
}
