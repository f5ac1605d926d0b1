//! Identity resolution: token claims, then named environment variables, then defaults.
//!
//! Each text field is described by a [`FieldChain`]: the token keys to try in order, the
//! variables to try in order and the literal default. Booleans only come from the token.

use serde_json::Value;
use tracing::instrument;

use super::token::{decode, TokenClaims};
use super::{
    canonical_url, IdentityRecord, IDENTITY_TOKEN_VAR, LANG_VAR, REPL_ID_VAR, REPL_LANGUAGE_VAR,
    REPL_NAME_VAR, REPL_OWNER_VAR, REPL_SLUG_VAR,
};
use crate::env::EnvSource;

/// Which branch produced the identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// The token decoded to a non-empty object.
    Token,
    /// No usable token; fields came from variables and defaults.
    Environment,
}

impl IdentitySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentitySource::Token => "token",
            IdentitySource::Environment => "environment",
        }
    }
}

struct FieldChain {
    token_keys: &'static [&'static str],
    env_vars: &'static [&'static str],
    default: &'static str,
}

const ID: FieldChain = FieldChain {
    token_keys: &["repl_id"],
    env_vars: &[REPL_ID_VAR],
    default: "unknown",
};
const NAME: FieldChain = FieldChain {
    token_keys: &["repl_name", "name"],
    env_vars: &[REPL_NAME_VAR],
    default: "Unknown",
};
const SLUG: FieldChain = FieldChain {
    token_keys: &["repl_slug", "slug"],
    env_vars: &[REPL_SLUG_VAR],
    default: "unknown",
};
const LANGUAGE: FieldChain = FieldChain {
    token_keys: &["language"],
    env_vars: &[REPL_LANGUAGE_VAR, LANG_VAR],
    default: "Unknown",
};
const OWNER_USER_ID: FieldChain = FieldChain {
    token_keys: &["user_id"],
    env_vars: &[],
    default: "unknown",
};
const OWNER_USER_NAME: FieldChain = FieldChain {
    token_keys: &["user_name"],
    env_vars: &[REPL_OWNER_VAR],
    default: "unknown",
};

impl FieldChain {
    fn resolve<E: EnvSource + ?Sized>(&self, claims: Option<&TokenClaims>, env: &E) -> String {
        claims
            .and_then(|c| self.token_keys.iter().find_map(|k| claim_text(c, k)))
            .or_else(|| env.first_var(self.env_vars))
            .unwrap_or_else(|| self.default.to_string())
    }
}

fn claim_text(claims: &TokenClaims, key: &str) -> Option<String> {
    match claims.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn claim_flag(claims: Option<&TokenClaims>, key: &str) -> bool {
    let parsed = match claims.and_then(|c| c.get(key)) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => match n.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.unwrap_or(false)
}

/// Merge decoded claims, variables and defaults into an identity record.
///
/// An empty claims object is treated like a missing token. The URL always comes from
/// the owner variable and the resolved slug, never from the token.
pub fn resolve<E: EnvSource + ?Sized>(
    decoded: Option<&TokenClaims>,
    env: &E,
) -> (IdentityRecord, IdentitySource) {
    let claims = decoded.filter(|c| !c.is_empty());
    let source = if claims.is_some() {
        IdentitySource::Token
    } else {
        IdentitySource::Environment
    };

    let slug = SLUG.resolve(claims, env);
    let url_owner = env
        .var(REPL_OWNER_VAR)
        .unwrap_or_else(|| "unknown".to_string());
    let record = IdentityRecord {
        id: ID.resolve(claims, env),
        name: NAME.resolve(claims, env),
        language: LANGUAGE.resolve(claims, env),
        is_public: claim_flag(claims, "is_public"),
        is_always_on: claim_flag(claims, "is_always_on"),
        is_boosted: claim_flag(claims, "is_boosted"),
        owner_user_id: OWNER_USER_ID.resolve(claims, env),
        owner_user_name: OWNER_USER_NAME.resolve(claims, env),
        canonical_url: canonical_url(&url_owner, &slug),
        slug,
    };

    tracing::debug!(source = source.as_str(), name = %record.name, "identity resolved");
    (record, source)
}

/// Read the token variable, decode it and resolve against the same environment.
#[instrument(level = "debug", skip_all)]
pub fn resolve_from_env<E: EnvSource + ?Sized>(env: &E) -> (IdentityRecord, IdentitySource) {
    let token = env.var(IDENTITY_TOKEN_VAR);
    let claims = decode(token.as_deref());
    resolve(claims.as_ref(), env)
}
