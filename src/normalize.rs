//! Card-code canonicalization.
//!
//! The inventory feed and the community deck builder disagree on casing and
//! on whether the leading `h` marker is present (`hBP01-001`, `HBP01-001`,
//! `BP01-001`). Every join between the two goes through [`normalize`].

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Optional marker letter, 2-3 alphanumeric set code, optional digit,
/// hyphen, 3-digit sequence number. ASCII only; `ſ` and `K` (Kelvin) are not
/// set-code letters.
static CARD_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[hH]?([A-Za-z0-9]{2,3}[0-9]?)-([0-9]{3})$").expect("card code pattern is valid")
});

/// Canonical key for one physical card design.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardIdentity(String);

impl CardIdentity {
    pub fn canonical_code(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CardIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a raw card code.
///
/// Recognized codes become `h{SETCODE}-{NNN}` with the set code upper-cased.
/// Anything else is returned trimmed with ASCII letters upper-cased, so
/// unknown formats still compare equal to themselves and a second pass never
/// changes the result. Never fails.
pub fn normalize(raw: &str) -> CardIdentity {
    let trimmed = raw.trim();
    match CARD_CODE.captures(trimmed) {
        Some(caps) => CardIdentity(format!(
            "h{}-{}",
            caps[1].to_ascii_uppercase(),
            &caps[2]
        )),
        None => CardIdentity(trimmed.to_ascii_uppercase()),
    }
}

/// True when `raw` matches the recognized card-code pattern.
pub fn is_recognized(raw: &str) -> bool {
    CARD_CODE.is_match(raw.trim())
}
