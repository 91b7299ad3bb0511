//! User resolution for record commands.
//!
//! Records belong to a user, and every command that reads or writes them
//! needs to know whose collection it is. The user is resolved through a chain:
//!
//! 1. `--as <user>` — explicit per-command override
//! 2. `SERAMA_USER` env var — shell/session level
//! 3. `user` in `~/.serama/config.toml` — default for single-user machines
//!
//! The resolved name picks the user's directory under the storage root,
//! so it is restricted to characters that are safe in a path segment.

use std::env;

use crate::config::Config;

/// Error message shown when no user can be resolved.
pub const USER_REQUIRED: &str = "user required: pass --as <user>, \
    set SERAMA_USER, or add `user = \"...\"` to ~/.serama/config.toml";

/// Resolve the acting user from the tiered resolution chain.
pub fn resolve_user(explicit: Option<&str>, config: &Config) -> Result<String, String> {
    let env_user = env::var("SERAMA_USER").ok();
    let user = pick(explicit, env_user.as_deref(), config.user.as_deref())
        .ok_or_else(|| USER_REQUIRED.to_string())?;
    validate_user(user)?;
    Ok(user.to_string())
}

/// First non-empty source wins.
fn pick<'a>(
    explicit: Option<&'a str>,
    env: Option<&'a str>,
    config: Option<&'a str>,
) -> Option<&'a str> {
    [explicit, env, config]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
}

/// A user name must be usable as a single directory name.
pub fn validate_user(user: &str) -> Result<(), String> {
    let valid = !user.is_empty()
        && !user.starts_with('.')
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(format!(
            "invalid user '{user}': use letters, digits, '-', '_' or '.', not starting with '.'"
        ))
    }
}
