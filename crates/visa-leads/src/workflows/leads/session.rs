use serde::Serialize;

/// Identity asserted by the session provider. Threaded explicitly into every
/// review operation in place of ambient request state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
}

/// External identity collaborator: resolves a presented bearer token to a
/// user, or nothing. No role distinction exists on the review surface.
pub trait SessionProvider: Send + Sync {
    fn authenticate(&self, token: Option<&str>) -> Option<AuthenticatedUser>;
}
