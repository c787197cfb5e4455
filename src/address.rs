//! Bitcoin address derivation and validation (P2PKH, Base58Check).

use subtle::ConstantTimeEq;

use crate::base58::{decode_check, encode_check};
use crate::curve::Point;
use crate::error::BitIdError;
use crate::hash::hash160;
use crate::recovery::encode_pubkey;

/// Network an address (or a challenge) is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn version_byte(self) -> u8 {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 111,
        }
    }
}

impl From<bool> for Network {
    /// `true` -> testnet, `false` -> mainnet, matching the façade's
    /// `is_testnet: bool` parameter convention.
    fn from(is_testnet: bool) -> Self {
        if is_testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }
}

/// Derives the Base58Check P2PKH address for a recovered public key.
pub fn derive_address(
    q: &Point,
    compressed: bool,
    network: Network,
) -> Result<String, BitIdError> {
    let pubkey_bytes = encode_pubkey(q, compressed)?;
    let hash = hash160(&pubkey_bytes);
    Ok(encode_check(network.version_byte(), &hash))
}

/// `true` iff `addr` decodes cleanly, its checksum matches, and its version
/// byte matches the expected network.
pub fn address_valid(addr: &str, is_testnet: bool) -> bool {
    match decode_check(addr) {
        Ok((version, payload)) => {
            payload.len() == 20 && version == Network::from(is_testnet).version_byte()
        }
        Err(_) => false,
    }
}

/// Constant-time comparison of two address strings, used for the final
/// "does the recovered address match the claimed one" check so address
/// bytes don't leak through a timing side channel.
pub fn addresses_match(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
