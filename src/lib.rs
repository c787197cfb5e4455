//! Verifier-side BitID: a passwordless challenge-response authentication
//! protocol built on Bitcoin message signatures.
//!
//! An embedding application calls [`build_uri`] to mint a challenge,
//! presents it to a wallet (typically rendered as a QR code via [`qrcode`]),
//! then calls [`challenge_valid`] once the wallet returns an address,
//! signature, and the (possibly echoed-back) BitID URI.
//!
//! This crate does no I/O: no HTTP, no nonce persistence, no image
//! rendering. Those are the embedding application's job.

mod address;
mod base58;
mod bigint;
mod curve;
mod error;
mod hash;
mod nonce;
mod recovery;
mod signature;
mod uri;
mod verifier;

pub use address::{address_valid, Network};
pub use error::{BitIdError, Result};
pub use nonce::{generate_nonce, NONCE_LEN};
pub use uri::{
    build_uri, extract_nonce, extract_unsecure, parse, qrcode, uri_valid, ParsedUri,
    BITID_SCHEME, PARAM_NONCE, PARAM_UNSECURE,
};
pub use verifier::{challenge_valid, signature_valid, Verifier};
