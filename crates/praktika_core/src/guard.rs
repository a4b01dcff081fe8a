//! crates/praktika_core/src/guard.rs
//!
//! Gates page rendering on session presence and role membership.

use crate::domain::{Identity, Role};
use crate::navigation::{dashboard_route, SIGN_IN_ROUTE};

/// The outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(&'static str),
}

impl AccessDecision {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether `identity` may see content restricted to `allowed` roles.
///
/// Unauthenticated visitors are sent to sign-in. An authenticated identity
/// with the wrong role is sent to its own dashboard instead, since it only
/// lacks authorization, not authentication. Callers must run this before
/// any side-effecting data fetch for the restricted page.
pub fn check(identity: Option<&Identity>, allowed: &[Role]) -> AccessDecision {
    match identity {
        None => AccessDecision::Redirect(SIGN_IN_ROUTE),
        Some(user) if allowed.contains(&user.role) => AccessDecision::Allow,
        Some(user) => AccessDecision::Redirect(dashboard_route(user.role)),
    }
}
