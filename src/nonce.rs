//! Nonce generation for challenge freshness.
//!
//! The core performs no replay check or persistence — callers own storing
//! and single-use enforcement of the nonces this produces.

use rand::Rng;

/// Length in hex characters of a generated nonce (8 bytes of entropy).
pub const NONCE_LEN: usize = 16;

/// Generates a lowercase hex nonce from the process's CSPRNG.
///
/// Unlike the Python reference implementation this resolves an Open
/// Question against (`os.urandom` mixed with a non-cryptographic PRNG and
/// the wall clock), entropy here comes from a single cryptographically
/// strong source, the same `rand::rng()` API the mikemaccana chat server
/// uses for its own wallet-auth nonces.
pub fn generate_nonce() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    hex::encode(bytes)
}
