//! Technician identity model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

/// Validation errors returned by the technician constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TechnicianValidationError {
    /// Identifier was not a valid UUID string.
    InvalidId,
    /// Username was blank once trimmed.
    EmptyUsername,
    /// Username fell outside the allowed length range.
    UsernameLength { min: usize, max: usize },
    /// Username contained characters outside the allowed set.
    UsernameInvalidCharacters,
    /// Display name was blank once trimmed.
    EmptyDisplayName,
    /// Display name fell outside the allowed length range.
    DisplayNameLength { min: usize, max: usize },
    /// Display name contained characters outside the allowed set.
    DisplayNameInvalidCharacters,
    /// Email did not have the shape `local@domain.tld`.
    InvalidEmail,
}

impl fmt::Display for TechnicianValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "technician id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameLength { min, max } => {
                write!(f, "username must be between {min} and {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameLength { min, max } => {
                write!(f, "display name must be between {min} and {max} characters")
            }
            Self::DisplayNameInvalidCharacters => write!(
                f,
                "display name may only contain letters, numbers, spaces, or underscores",
            ),
            Self::InvalidEmail => write!(f, "email must look like local@domain.tld"),
        }
    }
}

impl std::error::Error for TechnicianValidationError {}

/// Stable technician identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TechnicianId(Uuid);

impl TechnicianId {
    /// Validate and construct a [`TechnicianId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, TechnicianValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| TechnicianValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TechnicianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login name used to identify a technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 50;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

impl Username {
    /// Validate and construct a [`Username`]. Input is trimmed first.
    pub fn new(username: impl AsRef<str>) -> Result<Self, TechnicianValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TechnicianValidationError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(TechnicianValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        if !username_regex().is_match(trimmed) {
            return Err(TechnicianValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Human readable display name shown next to records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

/// Minimum allowed length for a display name.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 100;

static DISPLAY_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn display_name_regex() -> &'static Regex {
    DISPLAY_NAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_ ]+$")
            .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
    })
}

impl DisplayName {
    /// Validate and construct a [`DisplayName`]. Input is trimmed first.
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, TechnicianValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TechnicianValidationError::EmptyDisplayName);
        }
        let length = trimmed.chars().count();
        if !(DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&length) {
            return Err(TechnicianValidationError::DisplayNameLength {
                min: DISPLAY_NAME_MIN,
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name_regex().is_match(trimmed) {
            return Err(TechnicianValidationError::DisplayNameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

/// Contact address for a technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is not this layer's concern.
        Regex::new("^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate and construct an [`Email`]. Input is trimmed first.
    pub fn new(email: impl AsRef<str>) -> Result<Self, TechnicianValidationError> {
        let trimmed = email.as_ref().trim();
        if !email_regex().is_match(trimmed) {
            return Err(TechnicianValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Registered technician account.
///
/// ## Invariants
/// - `username` is unique across the store (enforced by persistence).
/// - `password_hash` is an Argon2id PHC string and never leaves the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technician {
    id: TechnicianId,
    username: Username,
    display_name: DisplayName,
    email: Option<Email>,
    password_hash: String,
}

impl Technician {
    /// Build a [`Technician`] from validated components.
    pub fn new(
        id: TechnicianId,
        username: Username,
        display_name: DisplayName,
        email: Option<Email>,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            username,
            display_name,
            email,
            password_hash,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &TechnicianId {
        &self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Name shown to other technicians.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Optional contact address.
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Argon2id PHC hash of the account password.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", TechnicianValidationError::EmptyUsername)]
    #[case("   ", TechnicianValidationError::EmptyUsername)]
    #[case("ab", TechnicianValidationError::UsernameLength { min: 3, max: 50 })]
    #[case("tech nico", TechnicianValidationError::UsernameInvalidCharacters)]
    #[case("tecnico!", TechnicianValidationError::UsernameInvalidCharacters)]
    fn invalid_usernames(#[case] input: &str, #[case] expected: TechnicianValidationError) {
        let err = Username::new(input).expect_err("invalid usernames must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  jperez  ", "jperez")]
    #[case("ana.garcia-2", "ana.garcia-2")]
    fn valid_usernames_are_trimmed(#[case] input: &str, #[case] expected: &str) {
        let username = Username::new(input).expect("valid username");
        assert_eq!(username.as_ref(), expected);
    }

    #[rstest]
    #[case("", TechnicianValidationError::EmptyDisplayName)]
    #[case("Jo", TechnicianValidationError::DisplayNameLength { min: 3, max: 100 })]
    #[case("Juan; drop", TechnicianValidationError::DisplayNameInvalidCharacters)]
    fn invalid_display_names(#[case] input: &str, #[case] expected: TechnicianValidationError) {
        let err = DisplayName::new(input).expect_err("invalid display names must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("tecnico@example.com")]
    #[case("  ana.garcia@empresa.co  ")]
    fn valid_emails(#[case] input: &str) {
        let email = Email::new(input).expect("valid email");
        assert_eq!(email.as_ref(), input.trim());
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("a@b")]
    #[case("a b@c.d")]
    fn invalid_emails(#[case] input: &str) {
        let err = Email::new(input).expect_err("invalid emails must fail");
        assert_eq!(err, TechnicianValidationError::InvalidEmail);
    }

    #[rstest]
    fn technician_id_round_trips_through_display() {
        let id = TechnicianId::random();
        let reparsed = TechnicianId::new(id.to_string()).expect("display output reparses");
        assert_eq!(reparsed, id);
    }

    #[rstest]
    fn bad_technician_ids_are_rejected() {
        let err = TechnicianId::new("not-a-uuid").expect_err("must fail");
        assert_eq!(err, TechnicianValidationError::InvalidId);
    }
}
