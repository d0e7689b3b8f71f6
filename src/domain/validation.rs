//! Field-level validation for user-master and guest-account input.
//!
//! All checks are pure and short-circuit on the first failure; callers get at
//! most one `FieldError` per validation pass.

/// Maximum lengths per field, in characters.
pub const MAX_EMAIL: usize = 50;
pub const MAX_LAST_NAME: usize = 20;
pub const MAX_FIRST_NAME: usize = 20;
pub const MAX_DEPARTMENT: usize = 50;
pub const MAX_USAGE_PURPOSE: usize = 200;

/// A single failed field with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

/// Check that `value` does not exceed `max` characters.
pub fn validate_length(value: &str, max: usize, field: &str) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len > max {
        return Err(FieldError::new(
            field,
            format!("{field} must be at most {max} characters (got {len})"),
        ));
    }
    Ok(())
}

/// Check length and basic shape of an email address.
pub fn validate_email(value: &str, field: &str) -> Result<(), FieldError> {
    validate_length(value, MAX_EMAIL, field)?;

    // local@domain.tld, no whitespace, single '@'
    let mut parts = value.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        _ => false,
    };

    if !valid {
        return Err(FieldError::new(
            field,
            format!("{field} is not a valid email address"),
        ));
    }
    Ok(())
}

/// Validate the editable fields of a user-master record.
pub fn validate_user_profile_fields(
    id: Option<&str>,
    last_name: Option<&str>,
    first_name: Option<&str>,
    department: Option<&str>,
) -> Result<(), FieldError> {
    if let Some(id) = id {
        validate_email(id, "email")?;
    }
    if let Some(last_name) = last_name {
        validate_length(last_name, MAX_LAST_NAME, "last_name")?;
    }
    if let Some(first_name) = first_name {
        validate_length(first_name, MAX_FIRST_NAME, "first_name")?;
    }
    if let Some(department) = department {
        validate_length(department, MAX_DEPARTMENT, "department")?;
    }
    Ok(())
}

/// Validate the guest-supplied fields of a guest account.
pub fn validate_guest_fields(
    last_name: Option<&str>,
    first_name: Option<&str>,
    department: Option<&str>,
    usage_purpose: Option<&str>,
    approver_email: Option<&str>,
) -> Result<(), FieldError> {
    if let Some(last_name) = last_name {
        validate_length(last_name, MAX_LAST_NAME, "last_name")?;
    }
    if let Some(first_name) = first_name {
        validate_length(first_name, MAX_FIRST_NAME, "first_name")?;
    }
    if let Some(department) = department {
        validate_length(department, MAX_DEPARTMENT, "department")?;
    }
    if let Some(usage_purpose) = usage_purpose {
        validate_length(usage_purpose, MAX_USAGE_PURPOSE, "usage_purpose")?;
    }
    if let Some(approver_email) = approver_email {
        validate_email(approver_email, "approver_email")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counts_characters_not_bytes() {
        // 20 Japanese characters are within the last_name limit
        let name = "山".repeat(20);
        assert!(validate_length(&name, MAX_LAST_NAME, "last_name").is_ok());
        let too_long = "山".repeat(21);
        assert!(validate_length(&too_long, MAX_LAST_NAME, "last_name").is_err());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email("staff@example.com", "email").is_ok());
        assert!(validate_email("no-at-sign.example.com", "email").is_err());
        assert!(validate_email("two@at@example.com", "email").is_err());
        assert!(validate_email("spaces in@example.com", "email").is_err());
        assert!(validate_email("nodot@localhost", "email").is_err());
    }

    #[test]
    fn email_length_limit_applies_before_format() {
        let long_local = "a".repeat(60);
        let err = validate_email(&format!("{long_local}@example.com"), "email").unwrap_err();
        assert!(err.message.contains("at most 50"));
    }

    #[test]
    fn guest_fields_short_circuit_on_first_failure() {
        let err = validate_guest_fields(
            Some(&"x".repeat(21)),
            Some(&"y".repeat(21)),
            None,
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.field, "last_name");
    }
}
