//! Signer requirement checks.
//!
//! Requirements are checked in the order given and the first unmet one is
//! reported, so errors stay stable for a given stored state.

use metadata_types::{Party, PartyType};

use crate::error::{AuthzError, AuthzResult};

fn is_signer(address: &str, signers: &[String]) -> bool {
    signers.iter().any(|signer| signer == address)
}

/// The first address with no matching signer.
pub fn first_missing_address<'a, I>(required: I, signers: &[String]) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    required
        .into_iter()
        .find(|address| !is_signer(address, signers))
}

/// The first party whose address is not among the signers.
pub fn first_missing_party<'a>(required: &'a [Party], signers: &[String]) -> Option<&'a Party> {
    required
        .iter()
        .find(|party| !is_signer(&party.address, signers))
}

/// Every party in `required` must have signed.
pub fn require_all_signers(required: &[Party], signers: &[String]) -> AuthzResult<()> {
    match first_missing_party(required, signers) {
        Some(party) => Err(AuthzError::MissingSignature {
            address: party.address.clone(),
            role: party.role,
        }),
        None => Ok(()),
    }
}

/// Every owner address must have signed.
pub fn require_all_owner_addresses(owners: &[String], signers: &[String]) -> AuthzResult<()> {
    match first_missing_address(owners.iter().map(String::as_str), signers) {
        Some(address) => Err(AuthzError::MissingSignature {
            address: address.to_string(),
            role: PartyType::Owner,
        }),
        None => Ok(()),
    }
}
