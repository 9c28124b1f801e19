use error_stack::{Report, ResultExt};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::auth::PrincipalResolver;
use kernel::prelude::entity::{AccessToken, Principal, UserId, UserRole};
use kernel::KernelError;

use crate::{env, env_opt};

static JWT_SECRET: &str = "JWT_SECRET";
static JWT_TTL_MINUTES: &str = "JWT_TTL_MINUTES";
const DEFAULT_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: UserRole,
    iat: i64,
    exp: i64,
}

/// HS256 bearer tokens carrying the user id and role.
#[derive(Clone)]
pub struct JwtPrincipalResolver {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtPrincipalResolver {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Reads `JWT_SECRET` and `JWT_TTL_MINUTES`.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let secret = env(JWT_SECRET)?;
        let minutes = match env_opt(JWT_TTL_MINUTES) {
            Some(minutes) => minutes
                .trim()
                .parse::<i64>()
                .change_context_lazy(|| KernelError::Internal)
                .attach_printable_lazy(|| {
                    format!("Env {} must be a number of minutes", JWT_TTL_MINUTES)
                })?,
            None => DEFAULT_TTL_MINUTES,
        };
        if minutes <= 0 {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Env {} must be positive", JWT_TTL_MINUTES)));
        }
        Ok(Self::new(&secret, Duration::minutes(minutes)))
    }
}

impl PrincipalResolver for JwtPrincipalResolver {
    fn issue(&self, principal: &Principal) -> error_stack::Result<AccessToken, KernelError> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: *principal.id().as_ref(),
            role: *principal.role(),
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("failed to sign access token")?;
        Ok(AccessToken::new(token))
    }

    fn resolve(&self, credential: &str) -> error_stack::Result<Principal, KernelError> {
        let data = decode::<Claims>(
            credential,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|error| {
            tracing::debug!(%error, "Rejected access token");
            Report::new(error)
                .change_context(KernelError::Unauthenticated)
                .attach_printable("invalid or expired token")
        })?;
        Ok(Principal::new(UserId::new(data.claims.sub), data.claims.role))
    }
}
