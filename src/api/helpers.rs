use crate::errors::AccountError;
use crate::stores::UserStore;
use crate::types::internal::Principal;
use poem::Request;

/// Header set by the identity-aware proxy in front of the service.
///
/// The proxy strips any client-supplied copy, so its presence means the
/// request passed upstream authentication.
pub const AUTH_EMAIL_HEADER: &str = "X-Authenticated-Email";

/// Resolve the caller from the trusted header and the user directory.
///
/// A missing or empty header is `Unauthenticated`. An email that does not
/// resolve in user_master still yields a principal without a profile, since
/// guests authenticate with their generated account email.
pub async fn resolve_principal(
    req: &Request,
    user_store: &UserStore,
) -> Result<Principal, AccountError> {
    let email = req
        .header(AUTH_EMAIL_HEADER)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(AccountError::Unauthenticated)?;

    let profile = user_store.get(email).await?;
    Ok(Principal::new(email.to_string(), profile))
}
