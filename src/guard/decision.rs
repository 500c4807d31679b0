use super::session::SessionRecord;

/// Outcome of evaluating a protected route against the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// Session present and role accepted.
    Authorized(SessionRecord),
    /// No session, or one that could not be read.
    NoSession,
    /// Session present but its role is not the one the route requires.
    RoleMismatch,
}

impl Access {
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorized(_) => "authorized",
            Self::NoSession => "no_session",
            Self::RoleMismatch => "role_mismatch",
        }
    }
}

/// Decide whether a session may view a route requiring `allowed_role`.
///
/// Roles are compared as exact strings. `None` for `allowed_role` admits any
/// session.
#[must_use]
pub fn decide(session: Option<SessionRecord>, allowed_role: Option<&str>) -> Access {
    let Some(session) = session else {
        return Access::NoSession;
    };

    match allowed_role {
        Some(role) if session.role != role => Access::RoleMismatch,
        _ => Access::Authorized(session),
    }
}
