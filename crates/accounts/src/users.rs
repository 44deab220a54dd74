//! Registered-user list: registration, lookup, and credential checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::error::AccountError;
use crate::password::{hash_password, validate_password_strength, verify_password};
use crate::store::KeyValueStore;

/// Storage key holding the JSON array of users.
pub const USERS_STORAGE_KEY: &str = "registeredUsers";

/// Minimum password length when none is configured.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Message returned when the email already has an account.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "This email is already registered.";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A stored account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_registered: DateTime<Utc>,
}

/// Registration form input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Please enter a username."))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Outcome shown under the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationResult {
    pub success: bool,
    pub message: String,
}

impl RegistrationResult {
    fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// First validation message, ordered by field name for stable output.
fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}."))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid registration details.".to_string())
}

// ---------------------------------------------------------------------------
// UserManager
// ---------------------------------------------------------------------------

/// Account operations over a [`KeyValueStore`].
pub struct UserManager<S> {
    store: S,
    storage_key: String,
    min_password_length: usize,
}

impl<S: KeyValueStore> UserManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            storage_key: USERS_STORAGE_KEY.to_string(),
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_min_password_length(mut self, min_length: usize) -> Self {
        self.min_password_length = min_length;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored users for a read-modify-write.
    ///
    /// Store failures propagate. Corrupt JSON is logged and read as an empty
    /// list, so the next write replaces it.
    fn load_users(&self) -> Result<Vec<User>, AccountError> {
        let Some(raw) = self.store.get(&self.storage_key)? else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::error!(key = %self.storage_key, error = %e, "Stored users are not valid JSON");
            Vec::new()
        }))
    }

    /// All stored users, for display and lookups.
    ///
    /// A missing key yields an empty list. Unreadable or corrupt data is
    /// logged and also treated as empty.
    pub fn all_users(&self) -> Vec<User> {
        self.load_users().unwrap_or_else(|e| {
            tracing::error!(key = %self.storage_key, error = %e, "Failed to read users");
            Vec::new()
        })
    }

    /// Whether an account exists for the email (case-insensitive).
    pub fn is_registered(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        self.all_users()
            .into_iter()
            .find(|u| u.email.to_lowercase() == needle)
    }

    /// Register a new account.
    ///
    /// Invalid input and duplicate emails produce an unsuccessful
    /// [`RegistrationResult`]; `Err` is reserved for hashing and storage
    /// failures. A failed read aborts before anything is written.
    pub fn register(&self, request: RegisterRequest) -> Result<RegistrationResult, AccountError> {
        if let Err(errors) = request.validate() {
            let message = first_validation_message(&errors);
            tracing::warn!(email = %request.email, reason = %message, "Registration rejected");
            return Ok(RegistrationResult::rejected(message));
        }

        if let Err(message) = validate_password_strength(&request.password, self.min_password_length)
        {
            tracing::warn!(email = %request.email, "Registration rejected: weak password");
            return Ok(RegistrationResult::rejected(message));
        }

        let mut users = self.load_users()?;
        let needle = request.email.to_lowercase();
        if users.iter().any(|u| u.email.to_lowercase() == needle) {
            tracing::warn!(email = %request.email, "Registration rejected: duplicate email");
            return Ok(RegistrationResult::rejected(DUPLICATE_EMAIL_MESSAGE));
        }

        let user = User {
            id: Uuid::new_v4(),
            password_hash: hash_password(&request.password)?,
            username: request.username,
            email: request.email,
            date_registered: Utc::now(),
        };
        let message = format!("User {} successfully registered.", user.username);
        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        users.push(user);
        self.store
            .set(&self.storage_key, serde_json::to_string(&users)?)?;

        Ok(RegistrationResult::ok(message))
    }

    /// Check an email/password pair. Unknown emails verify as `false`.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<bool, AccountError> {
        match self.find_by_email(email) {
            Some(user) => verify_password(password, &user.password_hash),
            None => Ok(false),
        }
    }
}
