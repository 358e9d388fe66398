//! Authentication primitives: login credentials and registration input.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::technician::{DisplayName, Email, TechnicianValidationError, Username};

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Password was shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort { min: usize },
    /// A technician field failed validation.
    Technician(TechnicianValidationError),
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::Technician(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<TechnicianValidationError> for AuthValidationError {
    fn from(value: TechnicianValidationError) -> Self {
        Self::Technician(value)
    }
}

/// Validated login credentials used by the authentication service.
///
/// ## Invariants
/// - `username` is trimmed and non-empty after trimming.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use mantenix::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("jperez", "hunter2hunter2").unwrap();
/// assert_eq!(creds.username(), "jperez");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(AuthValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration input for a new technician account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    display_name: DisplayName,
    email: Option<Email>,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw field inputs.
    ///
    /// Unlike login, the password here is held to the minimum-length policy
    /// because this path decides what the stored credential will be.
    pub fn try_from_parts(
        username: &str,
        display_name: &str,
        email: Option<&str>,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let username = Username::new(username)?;
        let display_name = DisplayName::new(display_name)?;
        let email = email
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(Email::new)
            .transpose()?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            username,
            display_name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested display name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Optional contact address.
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", AuthValidationError::EmptyUsername)]
    #[case("   ", "pw", AuthValidationError::EmptyUsername)]
    #[case("jperez", "", AuthValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  jperez  ", "secretsecret")]
    #[case("ana", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn registration_rejects_short_passwords() {
        let err = Registration::try_from_parts("jperez", "Juan Perez", None, "short")
            .expect_err("short password must fail");
        assert_eq!(err, AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
    }

    #[rstest]
    fn registration_treats_blank_email_as_absent() {
        let registration =
            Registration::try_from_parts("jperez", "Juan Perez", Some("   "), "longenough")
                .expect("blank email is optional");
        assert!(registration.email().is_none());
    }

    #[rstest]
    fn registration_validates_email_shape() {
        let err = Registration::try_from_parts(
            "jperez",
            "Juan Perez",
            Some("not-an-email"),
            "longenough",
        )
        .expect_err("malformed email must fail");
        assert!(matches!(err, AuthValidationError::Technician(_)));
    }

    #[rstest]
    fn registration_keeps_validated_fields() {
        let registration = Registration::try_from_parts(
            " jperez ",
            " Juan Perez ",
            Some("jperez@example.com"),
            "longenough",
        )
        .expect("valid registration");
        assert_eq!(registration.username().as_ref(), "jperez");
        assert_eq!(registration.display_name().as_ref(), "Juan Perez");
        assert_eq!(
            registration.email().map(AsRef::as_ref),
            Some("jperez@example.com")
        );
    }
}
