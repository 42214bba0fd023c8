//! Security utilities: credential handling and boundary input validation.

use crate::error::{GuardError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure string that automatically clears its contents when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecureString(String);

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(***)")
    }
}

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the string value. Use carefully and avoid storing the result.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Convert to a regular string. The SecureString will be zeroized.
    pub fn into_string(mut self) -> String {
        let value = std::mem::take(&mut self.0);
        self.0.zeroize();
        value
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Maximum accepted property name length, in characters.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum accepted address length, in characters.
pub const MAX_ADDRESS_LENGTH: usize = 512;

/// Validation of user input arriving from the command line or a chat command.
///
/// The validator itself accepts any string; these checks guard the outer
/// surfaces before any external service is contacted.
pub struct InputSecurity;

impl InputSecurity {
    /// Validates a candidate property name.
    ///
    /// # Examples
    /// ```rust
    /// use name_guard::security::InputSecurity;
    ///
    /// assert!(InputSecurity::validate_property_name("Pleasant Valley").is_ok());
    /// assert!(InputSecurity::validate_property_name("   ").is_err());
    /// assert!(InputSecurity::validate_property_name("Bad\u{0007}Name").is_err());
    /// ```
    pub fn validate_property_name(name: &str) -> Result<()> {
        Self::validate_text(name, MAX_NAME_LENGTH, "name")
    }

    /// Validates a street address.
    pub fn validate_address(address: &str) -> Result<()> {
        Self::validate_text(address, MAX_ADDRESS_LENGTH, "address")
    }

    /// Validates a search radius in miles.
    pub fn validate_radius(radius_miles: f64) -> Result<()> {
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(GuardError::invalid_input(
                "radius",
                format!("must be a positive number of miles, got {radius_miles}"),
            ));
        }
        Ok(())
    }

    fn validate_text(value: &str, max_length: usize, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(GuardError::invalid_input(
                field,
                "cannot be empty or whitespace-only",
            ));
        }

        let length = value.chars().count();
        if length > max_length {
            return Err(GuardError::invalid_input(
                field,
                format!("too long: {length} characters (max {max_length})"),
            ));
        }

        static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| {
            // This regex is compile-time constant and known to be valid
            #[allow(clippy::expect_used)]
            Regex::new(r"[\p{Cc}]").expect("Hard-coded regex pattern should be valid")
        });
        if CONTROL_CHARS.is_match(value) {
            return Err(GuardError::invalid_input(
                field,
                "cannot contain control characters",
            ));
        }

        Ok(())
    }
}
