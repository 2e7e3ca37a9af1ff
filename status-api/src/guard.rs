//! Per-action ability checks
//!
//! Handlers receive the caller explicitly through the [`Caller`] extractor and
//! call [`guard`] with the ability their action needs before touching the
//! request body or storage.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::handlers::ApiError;
use crate::middleware::Claims;

/// Ability granting every other ability
pub const WILDCARD_ABILITY: &str = "*";

pub const COMPONENT_GROUPS_MANAGE: &str = "component-groups.manage";
pub const COMPONENT_GROUPS_DELETE: &str = "component-groups.delete";
pub const SCHEDULES_MANAGE: &str = "schedules.manage";
pub const SCHEDULES_DELETE: &str = "schedules.delete";

/// The party making the request; anonymous when no valid token was sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    claims: Option<Claims>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(claims: Claims) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Numeric id of the calling user, if the token subject is a user
    pub fn user_id(&self) -> Option<u64> {
        self.claims
            .as_ref()
            .and_then(Claims::user_id)
            .and_then(|id| id.parse().ok())
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            claims: parts.extensions.get::<Claims>().cloned(),
        })
    }
}

/// Decides whether verified claims grant an ability
pub trait AbilityChecker: Send + Sync {
    fn check(&self, claims: &Claims, ability: &str) -> bool;
}

/// Reads abilities from the token's `perms` claim
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAbilities;

impl AbilityChecker for TokenAbilities {
    fn check(&self, claims: &Claims, ability: &str) -> bool {
        claims.has_permission(ability) || claims.has_permission(WILDCARD_ABILITY)
    }
}

/// Require `ability` of `caller`.
///
/// # Errors
///
/// `Unauthorized` for an anonymous caller, `Forbidden` when the ability is
/// not granted. The denial never names the ability.
pub fn guard(checker: &dyn AbilityChecker, caller: &Caller, ability: &str) -> Result<(), ApiError> {
    let Some(claims) = caller.claims() else {
        tracing::debug!(ability, "Rejected anonymous caller");
        return Err(ApiError::unauthorized("Unauthenticated."));
    };

    if checker.check(claims, ability) {
        Ok(())
    } else {
        tracing::info!(sub = %claims.sub, ability, "Ability denied");
        Err(ApiError::forbidden("This action is unauthorized."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;
    use axum::http::Request;

    fn caller_with(perms: &[&str]) -> Caller {
        Caller::authenticated(Claims::new("user:7", perms.iter().copied()))
    }

    #[test]
    fn test_anonymous_is_unauthorized() {
        let error = guard(&TokenAbilities, &Caller::anonymous(), SCHEDULES_MANAGE).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Unauthorized);
    }

    #[test]
    fn test_missing_ability_is_forbidden_without_naming_it() {
        let caller = caller_with(&[SCHEDULES_MANAGE]);
        let error = guard(&TokenAbilities, &caller, SCHEDULES_DELETE).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Forbidden);
        assert!(!error.message.contains("schedules"));
    }

    #[test]
    fn test_granted_ability_passes() {
        let caller = caller_with(&[COMPONENT_GROUPS_MANAGE]);
        assert!(guard(&TokenAbilities, &caller, COMPONENT_GROUPS_MANAGE).is_ok());
        assert!(guard(&TokenAbilities, &caller, COMPONENT_GROUPS_DELETE).is_err());
    }

    #[test]
    fn test_wildcard_grants_everything() {
        let caller = caller_with(&[WILDCARD_ABILITY]);
        for ability in [
            COMPONENT_GROUPS_MANAGE,
            COMPONENT_GROUPS_DELETE,
            SCHEDULES_MANAGE,
            SCHEDULES_DELETE,
        ] {
            assert!(guard(&TokenAbilities, &caller, ability).is_ok(), "{}", ability);
        }
    }

    #[test]
    fn test_custom_checker_is_consulted() {
        struct DenyAll;
        impl AbilityChecker for DenyAll {
            fn check(&self, _claims: &Claims, _ability: &str) -> bool {
                false
            }
        }

        let caller = caller_with(&[WILDCARD_ABILITY]);
        let error = guard(&DenyAll, &caller, SCHEDULES_MANAGE).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Forbidden);
    }

    #[test]
    fn test_caller_user_id() {
        assert_eq!(caller_with(&[]).user_id(), Some(7));
        let client = Caller::authenticated(Claims::new("client:ci", Vec::<String>::new()));
        assert_eq!(client.user_id(), None);
        assert_eq!(Caller::anonymous().user_id(), None);
    }

    #[tokio::test]
    async fn test_extractor_reads_extensions() {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        request
            .extensions_mut()
            .insert(Claims::new("user:3", ["schedules.manage"]));
        let (mut parts, _) = request.into_parts();

        let caller = Caller::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(caller.user_id(), Some(3));

        let (mut bare, _) = Request::builder().uri("/").body(()).unwrap().into_parts();
        let anonymous = Caller::from_request_parts(&mut bare, &()).await.unwrap();
        assert!(anonymous.claims().is_none());
    }
}
