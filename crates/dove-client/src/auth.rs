use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::info;

use dove_types::api::Claims;
use dove_types::events::AppEvent;

use crate::error::{Error, Result};
use crate::notify::Notifier;

/// A signed-in user, decoded from the backend's session token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub name: Option<String>,
    pub is_admin: bool,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Decode the token's claims. The signature is not checked here: only
    /// the backend holds the secret, and it validates every request.
    pub fn from_token(token: &str) -> Result<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
        let claims = data.claims;

        let expires_at = DateTime::from_timestamp(claims.exp as i64, 0)
            .ok_or_else(|| Error::config(format!("token expiry out of range: {}", claims.exp)))?;

        Ok(Self {
            token: token.to_string(),
            is_admin: claims.is_admin(),
            user_id: claims.sub,
            name: claims.name,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Who is using the app right now. Cloned into every view and passed
/// explicitly to every operation that needs a session.
#[derive(Clone)]
pub struct AuthContext {
    session: Arc<RwLock<Option<Session>>>,
    notifier: Notifier,
}

impl AuthContext {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
            notifier,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session()
            .is_some_and(|s| !s.is_expired_at(Utc::now()))
    }

    pub fn is_admin(&self) -> bool {
        self.is_logged_in() && self.session().is_some_and(|s| s.is_admin)
    }

    /// Token of the active session, or `Unauthenticated`.
    pub fn token(&self) -> Result<String> {
        match self.session() {
            Some(s) if !s.is_expired_at(Utc::now()) => Ok(s.token),
            _ => Err(Error::Unauthenticated),
        }
    }

    /// Token of an active admin session.
    pub fn admin_token(&self) -> Result<String> {
        let token = self.token()?;
        if !self.is_admin() {
            return Err(Error::Forbidden);
        }
        Ok(token)
    }

    pub fn sign_in(&self, session: Session) {
        info!("Signed in as {}", session.user_id);
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        self.notifier.publish(AppEvent::SessionChanged { logged_in: true });
    }

    pub fn logout(&self) {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("Signed out");
            self.notifier.publish(AppEvent::SessionChanged { logged_in: false });
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    pub(crate) fn token_for(sub: &str, role: Option<&str>, valid_for: chrono::Duration) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            name: Some("Ruth".into()),
            role: role.map(str::to_string),
            exp: (Utc::now() + valid_for).timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"server-only-secret"),
        )
        .unwrap()
    }

    pub(crate) fn signed_in(role: Option<&str>) -> AuthContext {
        let auth = AuthContext::new(Notifier::new());
        let token = token_for("u1", role, chrono::Duration::hours(1));
        auth.sign_in(Session::from_token(&token).unwrap());
        auth
    }

    #[test]
    fn decodes_claims_without_the_secret() {
        let token = token_for("u42", Some("admin"), chrono::Duration::days(1));
        let session = Session::from_token(&token).unwrap();
        assert_eq!(session.user_id, "u42");
        assert_eq!(session.name.as_deref(), Some("Ruth"));
        assert!(session.is_admin);
        assert!(!session.is_expired_at(Utc::now()));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(Session::from_token("not-a-jwt").is_err());
    }

    #[test]
    fn member_is_not_admin() {
        let auth = signed_in(Some("member"));
        assert!(auth.is_logged_in());
        assert!(!auth.is_admin());
        assert!(auth.token().is_ok());
        assert!(matches!(auth.admin_token(), Err(Error::Forbidden)));
    }

    #[test]
    fn expired_session_is_logged_out() {
        let auth = AuthContext::new(Notifier::new());
        let token = token_for("u1", Some("admin"), chrono::Duration::hours(-1));
        auth.sign_in(Session::from_token(&token).unwrap());

        assert!(!auth.is_logged_in());
        assert!(!auth.is_admin());
        assert!(matches!(auth.token(), Err(Error::Unauthenticated)));
    }

    #[tokio::test]
    async fn logout_clears_and_notifies() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        let auth = AuthContext::new(notifier);
        let token = token_for("u1", None, chrono::Duration::hours(1));

        auth.sign_in(Session::from_token(&token).unwrap());
        auth.logout();

        assert!(!auth.is_logged_in());
        assert_eq!(rx.recv().await.unwrap(), AppEvent::SessionChanged { logged_in: true });
        assert_eq!(rx.recv().await.unwrap(), AppEvent::SessionChanged { logged_in: false });

        // second logout is silent
        auth.logout();
        assert!(rx.try_recv().is_err());
    }
}
