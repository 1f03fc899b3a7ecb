//! Ticket tokens
//!
//! A token is an opaque string. The minter guarantees uniqueness for the
//! lifetime of one facility; nothing else about the format is promised.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle for one open stay
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketToken(String);

impl TicketToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TicketToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TicketToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the open-ticket table be queried with a plain `&str`
impl Borrow<str> for TicketToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TicketToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TicketToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How fresh tokens are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScheme {
    /// `TICKET-000001`, `TICKET-000002`, ...
    #[default]
    Sequential,
    /// Random UUID v4
    Uuid,
}

/// Produces unique tokens.
///
/// Not thread-safe on its own; the facility keeps it inside the allocation
/// lock so minting is part of the park critical section.
#[derive(Debug)]
pub struct TokenMinter {
    scheme: TokenScheme,
    next: u64,
}

impl TokenMinter {
    pub fn new(scheme: TokenScheme) -> Self {
        Self { scheme, next: 1 }
    }

    pub fn scheme(&self) -> TokenScheme {
        self.scheme
    }

    /// Number of tokens minted so far
    pub fn issued(&self) -> u64 {
        self.next - 1
    }

    pub fn mint(&mut self) -> TicketToken {
        let seq = self.next;
        self.next += 1;
        match self.scheme {
            TokenScheme::Sequential => TicketToken(format!("TICKET-{:06}", seq)),
            TokenScheme::Uuid => TicketToken(Uuid::new_v4().to_string()),
        }
    }
}

impl Default for TokenMinter {
    fn default() -> Self {
        Self::new(TokenScheme::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sequential_tokens() {
        let mut minter = TokenMinter::new(TokenScheme::Sequential);
        assert_eq!(minter.mint().as_str(), "TICKET-000001");
        assert_eq!(minter.mint().as_str(), "TICKET-000002");
        assert_eq!(minter.issued(), 2);
    }

    #[test]
    fn test_uuid_tokens_unique() {
        let mut minter = TokenMinter::new(TokenScheme::Uuid);
        let tokens: HashSet<TicketToken> = (0..100).map(|_| minter.mint()).collect();
        assert_eq!(tokens.len(), 100);
        assert!(tokens.iter().all(|t| Uuid::parse_str(t.as_str()).is_ok()));
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let token = TicketToken::from("TICKET-000042");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"TICKET-000042\"");
    }

    #[test]
    fn test_scheme_serde() {
        let scheme: TokenScheme = serde_json::from_str("\"uuid\"").unwrap();
        assert_eq!(scheme, TokenScheme::Uuid);
        assert_eq!(TokenScheme::default(), TokenScheme::Sequential);
    }
}
