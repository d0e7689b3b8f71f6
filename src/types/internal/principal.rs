use crate::types::db::user_profile;

/// The authenticated caller of an operation.
///
/// The identity provider in front of the service guarantees the email; the
/// directory profile is present only when the email resolves in user_master.
/// Guest callers (self-service extension requests) typically have no profile,
/// since their record lives in guest_accounts instead.
#[derive(Debug, Clone)]
pub struct Principal {
    pub email: String,
    pub profile: Option<user_profile::Model>,
}

impl Principal {
    pub fn new(email: String, profile: Option<user_profile::Model>) -> Self {
        Self { email, profile }
    }

    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.is_admin)
    }

    pub fn is_staff(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.is_staff())
    }

    /// Operator name recorded in audit entries; falls back to the email when
    /// the caller has no directory profile.
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .map(|p| p.display_name())
            .unwrap_or_else(|| self.email.clone())
    }
}
