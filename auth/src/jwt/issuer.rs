use std::fmt;

/// Token family a token was minted for, carried in the `iss` claim.
///
/// Validation pins the issuer, so a token minted for another purpose is
/// rejected even when its signature checks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenIssuer {
    /// Session access token handed out at login.
    Access,
}

impl TokenIssuer {
    /// Wire value of the `iss` claim.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenIssuer::Access => "chirpy-access",
        }
    }

    /// Recognise an `iss` claim value; unknown issuers yield `None`.
    pub fn from_claim(iss: &str) -> Option<Self> {
        [TokenIssuer::Access]
            .into_iter()
            .find(|issuer| issuer.as_str() == iss)
    }
}

impl fmt::Display for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
