use nt_core::UserData;
use nt_feed::Logger;
use nt_storage::SessionStore;
use crate::navigator::{Navigator, Route};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

struct Credential {
    email: &'static str,
    password: &'static str,
}

const USERS: &[Credential] = &[
    Credential { email: "francesco@live.it", password: "ciao" },
    Credential { email: "test@test.com", password: "password2" },
];

/// Returns the canonical email of the matching user. Email is compared
/// case-insensitively, the password exactly.
pub fn check_credentials(email: &str, password: &str) -> Option<&'static str> {
    let email = email.to_lowercase();
    USERS
        .iter()
        .find(|user| user.email.to_lowercase() == email && user.password == password)
        .map(|user| user.email)
}

/// Login screen. Not a security boundary: the user table is static.
pub struct LoginController {
    session: SessionStore,
    pub email: String,
    pub password: String,
    error: Option<String>,
    logger: Logger,
}

impl LoginController {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            email: String::new(),
            password: String::new(),
            error: None,
            logger: Logger::new().with_prefix("[login]"),
        }
    }

    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = email.into();
        self.password = password.into();
        self
    }

    /// Message shown under the form, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check the form. On success the session marker is saved and the
    /// navigator moves to the news list. Returns whether it navigated.
    pub async fn submit(&mut self, navigator: &mut Navigator) -> bool {
        let Some(email) = check_credentials(&self.email, &self.password) else {
            self.logger.warn(&format!("Rejected login for {}", self.email));
            self.error = Some(INVALID_CREDENTIALS.to_string());
            return false;
        };

        let user = UserData { email: email.to_string() };
        if let Err(e) = self.session.save_user(&user).await {
            self.logger.warn(&format!("Failed to save session: {}", e));
            self.error = Some(e.to_string());
            return false;
        }

        self.error = None;
        self.logger.info(&format!("Logged in as {}", email));
        navigator.navigate(Route::News);
        true
    }
}
