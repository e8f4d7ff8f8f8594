//! Account address codec contract.
//!
//! Account addresses (owners, signers, value owners) travel as strings. The
//! registry never interprets them structurally: it only needs to know that
//! a string is well formed and to compare canonical forms for equality.

use crate::error::AddressError;

/// Maximum accepted account address length, in bytes.
pub const MAX_ACCOUNT_ADDRESS_LEN: usize = 255;

/// Converts account address strings to canonical bytes.
pub trait AddressCodec: Send + Sync {
    fn decode(&self, address: &str) -> Result<Vec<u8>, AddressError>;

    fn is_well_formed(&self, address: &str) -> bool {
        self.decode(address).is_ok()
    }
}

/// Codec accepting any non-empty printable ASCII string without whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAddressCodec;

impl AddressCodec for PlainAddressCodec {
    fn decode(&self, address: &str) -> Result<Vec<u8>, AddressError> {
        if address.is_empty() {
            return Err(AddressError::EmptyAccount);
        }
        if address.len() > MAX_ACCOUNT_ADDRESS_LEN {
            return Err(AddressError::AccountTooLong {
                max: MAX_ACCOUNT_ADDRESS_LEN,
                actual: address.len(),
            });
        }
        if !address.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(AddressError::InvalidAccount(address.to_string()));
        }
        Ok(address.as_bytes().to_vec())
    }
}
