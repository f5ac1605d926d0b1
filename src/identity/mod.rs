#![allow(clippy::module_name_repetitions)]
//! Sandbox identity: best-effort token decoding and per-field fallback resolution.

mod resolve;
mod token;

use serde::Serialize;

pub use resolve::{resolve, resolve_from_env, IdentitySource};
pub use token::{decode, TokenClaims};

/// Opaque dot-segmented token issued by the hosting environment.
pub const IDENTITY_TOKEN_VAR: &str = "REPL_IDENTITY";
pub const REPL_ID_VAR: &str = "REPL_ID";
pub const REPL_NAME_VAR: &str = "REPL_NAME";
pub const REPL_SLUG_VAR: &str = "REPL_SLUG";
pub const REPL_LANGUAGE_VAR: &str = "REPL_LANGUAGE";
pub const LANG_VAR: &str = "LANG";
pub const REPL_OWNER_VAR: &str = "REPL_OWNER";

/// Fully resolved description of the workspace. Every field always has a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub language: String,
    pub is_public: bool,
    pub is_always_on: bool,
    pub is_boosted: bool,
    #[serde(rename = "user_id")]
    pub owner_user_id: String,
    #[serde(rename = "user_name")]
    pub owner_user_name: String,
    #[serde(rename = "url")]
    pub canonical_url: String,
}

/// Canonical workspace URL for an owner and slug.
pub fn canonical_url(owner: &str, slug: &str) -> String {
    format!("https://replit.com/@{owner}/{slug}")
}
