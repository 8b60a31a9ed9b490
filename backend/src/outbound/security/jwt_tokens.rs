//! HS256 JWT implementation of the [`SessionTokenIssuer`] port.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{EncodingKey, Header, encode};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionTokenIssuer, TokenIssueError};
use crate::domain::{Role, SessionToken, UserProfile};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    /// Role at login time.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Signs session tokens with a shared secret.
pub struct JwtSessionTokenIssuer {
    key: EncodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokenIssuer {
    /// Issuer signing with `secret`; tokens expire `ttl` after issue.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    /// Issuer signing with 32 random bytes. Tokens do not survive a restart.
    pub fn with_random_secret(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut secret = zeroize::Zeroizing::new([0_u8; 32]);
        rand::thread_rng().fill_bytes(&mut *secret);
        Self::new(&*secret, ttl, clock)
    }
}

impl fmt::Debug for JwtSessionTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSessionTokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionTokenIssuer for JwtSessionTokenIssuer {
    fn issue(&self, user: &UserProfile) -> Result<SessionToken, TokenIssueError> {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenIssueError::encoding("token lifetime exceeds the calendar"))?;
        let claims = SessionClaims {
            sub: user.id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.key)
            .map(SessionToken::new)
            .map_err(|err| TokenIssueError::encoding(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::{DateTime, Local, Utc};
    use jsonwebtoken::{DecodingKey, Validation, decode};
    use rstest::rstest;

    struct NowClock;

    impl Clock for NowClock {
        fn local(&self) -> DateTime<Local> {
            Local::now()
        }

        fn utc(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::random(),
            full_name: "Employee User".to_owned(),
            email: "employee@test.com".to_owned(),
            user_name: "employee".to_owned(),
            role: Role::Employee,
        }
    }

    #[rstest]
    fn tokens_carry_subject_role_and_expiry() {
        let issuer =
            JwtSessionTokenIssuer::new(b"test-secret", Duration::hours(24), Arc::new(NowClock));
        let user = profile();

        let token = issuer.issue(&user).expect("token");
        let decoded = decode::<SessionClaims>(
            token.as_str(),
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .expect("valid token");

        assert_eq!(decoded.claims.sub, user.id.to_string());
        assert_eq!(decoded.claims.role, Role::Employee);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 24 * 3600);
    }

    #[rstest]
    fn random_secrets_differ_between_issuers() {
        let user = profile();
        let issuer = JwtSessionTokenIssuer::with_random_secret(Duration::hours(1), Arc::new(NowClock));
        let first = issuer.issue(&user).expect("token");
        let rejected = decode::<SessionClaims>(
            first.as_str(),
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        );
        assert!(rejected.is_err());
    }

    #[rstest]
    fn oversized_lifetime_is_an_error() {
        let ttl = Duration::hours(i64::from(u32::MAX));
        let issuer = JwtSessionTokenIssuer::new(b"test-secret", ttl, Arc::new(NowClock));

        let err = issuer.issue(&profile()).expect_err("expiry overflows");
        assert!(matches!(err, TokenIssueError::Encoding { .. }));
    }
}
