//! Parties and their roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a party plays on a scope or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyType {
    Unspecified,
    Originator,
    Servicer,
    Investor,
    Custodian,
    Owner,
    Affiliate,
    Omnibus,
    Provenance,
    Controller,
    Validator,
}

impl PartyType {
    pub const ALL: [PartyType; 11] = [
        PartyType::Unspecified,
        PartyType::Originator,
        PartyType::Servicer,
        PartyType::Investor,
        PartyType::Custodian,
        PartyType::Owner,
        PartyType::Affiliate,
        PartyType::Omnibus,
        PartyType::Provenance,
        PartyType::Controller,
        PartyType::Validator,
    ];

    /// Full name, e.g. `PARTY_TYPE_OWNER`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyType::Unspecified => "PARTY_TYPE_UNSPECIFIED",
            PartyType::Originator => "PARTY_TYPE_ORIGINATOR",
            PartyType::Servicer => "PARTY_TYPE_SERVICER",
            PartyType::Investor => "PARTY_TYPE_INVESTOR",
            PartyType::Custodian => "PARTY_TYPE_CUSTODIAN",
            PartyType::Owner => "PARTY_TYPE_OWNER",
            PartyType::Affiliate => "PARTY_TYPE_AFFILIATE",
            PartyType::Omnibus => "PARTY_TYPE_OMNIBUS",
            PartyType::Provenance => "PARTY_TYPE_PROVENANCE",
            PartyType::Controller => "PARTY_TYPE_CONTROLLER",
            PartyType::Validator => "PARTY_TYPE_VALIDATOR",
        }
    }

    /// Name without the `PARTY_TYPE_` prefix.
    pub fn simple_str(&self) -> &'static str {
        self.as_str().trim_start_matches("PARTY_TYPE_")
    }

    pub fn is_specified(&self) -> bool {
        *self != PartyType::Unspecified
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account address paired with the role it plays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub address: String,
    pub role: PartyType,
}

impl Party {
    pub fn new(address: impl Into<String>, role: PartyType) -> Self {
        Self {
            address: address.into(),
            role,
        }
    }

    pub fn owner(address: impl Into<String>) -> Self {
        Self::new(address, PartyType::Owner)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.address, self.role)
    }
}
