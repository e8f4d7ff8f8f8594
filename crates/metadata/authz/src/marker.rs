//! Marker account authority.
//!
//! A marker is a custodial account whose access grants decide who may move
//! value in or out of it. When a scope's value owner is a marker, changing
//! the value owner needs a signer holding the matching grant on that marker.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use metadata_types::AddressCodec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Permissions an address may hold on a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Access {
    Mint,
    Burn,
    Deposit,
    Withdraw,
    Delete,
    Admin,
    Transfer,
    ForceTransfer,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Access::Mint => "ACCESS_MINT",
            Access::Burn => "ACCESS_BURN",
            Access::Deposit => "ACCESS_DEPOSIT",
            Access::Withdraw => "ACCESS_WITHDRAW",
            Access::Delete => "ACCESS_DELETE",
            Access::Admin => "ACCESS_ADMIN",
            Access::Transfer => "ACCESS_TRANSFER",
            Access::ForceTransfer => "ACCESS_FORCE_TRANSFER",
        };
        f.write_str(name)
    }
}

/// The permissions granted to one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub address: String,
    pub permissions: Vec<Access>,
}

impl AccessGrant {
    pub fn new(address: impl Into<String>, permissions: Vec<Access>) -> Self {
        Self {
            address: address.into(),
            permissions,
        }
    }
}

/// All access grants on one marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrantSet {
    grants: Vec<AccessGrant>,
}

impl AccessGrantSet {
    pub fn new(grants: Vec<AccessGrant>) -> Self {
        Self { grants }
    }

    pub fn grants(&self) -> &[AccessGrant] {
        &self.grants
    }

    /// Whether the address with canonical form `signer` holds `access`.
    fn grants_access(&self, codec: &dyn AddressCodec, signer: &[u8], access: Access) -> bool {
        self.grants.iter().any(|grant| {
            grant.permissions.contains(&access)
                && codec
                    .decode(&grant.address)
                    .map(|canonical| canonical == signer)
                    .unwrap_or(false)
        })
    }
}

/// Account lookup seen from the registry: only markers matter.
pub trait AccountLookup: Send + Sync {
    /// Access grants of the marker at `address`, or `None` when the address
    /// has no account or its account is not a marker.
    fn marker_access_grants(&self, address: &str) -> Option<AccessGrantSet>;
}

#[derive(Debug, Clone)]
enum Account {
    Marker(AccessGrantSet),
    Base,
}

/// Simple in-memory account registry.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_marker(&self, address: impl Into<String>, grants: Vec<AccessGrant>) {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.into(), Account::Marker(AccessGrantSet::new(grants)));
    }

    /// Register a plain, non-marker account.
    pub fn add_account(&self, address: impl Into<String>) {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.into(), Account::Base);
    }
}

impl AccountLookup for InMemoryAccounts {
    fn marker_access_grants(&self, address: &str) -> Option<AccessGrantSet> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        match accounts.get(address)? {
            Account::Marker(grants) => Some(grants.clone()),
            Account::Base => None,
        }
    }
}

/// Outcome of a marker authority check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerAuthority {
    pub is_marker: bool,
    pub has_authority: bool,
}

impl MarkerAuthority {
    /// A marker no signer holds the required access on.
    pub fn is_unauthorized_marker(&self) -> bool {
        self.is_marker && !self.has_authority
    }
}

/// Decide whether `address` is a marker and, if so, whether any signer
/// holds `required` on it.
///
/// Never fails. Signers the codec rejects are skipped.
pub fn marker_authority(
    accounts: &dyn AccountLookup,
    codec: &dyn AddressCodec,
    address: &str,
    signers: &[String],
    required: Access,
) -> MarkerAuthority {
    let Some(grants) = accounts.marker_access_grants(address) else {
        return MarkerAuthority::default();
    };

    let has_authority = signers.iter().any(|signer| match codec.decode(signer) {
        Ok(canonical) => grants.grants_access(codec, &canonical, required),
        Err(err) => {
            debug!(signer = %signer, error = %err, "Skipping malformed signer");
            false
        }
    });

    MarkerAuthority {
        is_marker: true,
        has_authority,
    }
}
