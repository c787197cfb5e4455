//! The verifier façade: orchestrates address, URI, and signature checks into
//! a single accept/reject verdict.

use crate::address::{address_valid, addresses_match, derive_address, Network};
use crate::error::BitIdError;
use crate::hash::bitid_message_digest;
use crate::recovery::recover_public_key;
use crate::signature::decode_signature;
use crate::uri::{build_uri, uri_valid};

fn signature_valid_checked(
    address: &str,
    signature: &str,
    bitid_uri: &str,
    is_testnet: bool,
) -> Result<(), BitIdError> {
    let digest = bitid_message_digest(bitid_uri);
    let sig = decode_signature(signature)?;
    let q = recover_public_key(&digest, &sig)?;
    let derived = derive_address(&q, sig.is_compressed(), Network::from(is_testnet))?;

    if addresses_match(&derived, address) {
        Ok(())
    } else {
        Err(BitIdError::VerificationFailed)
    }
}

/// Checks `signature` over `bitid_uri` recovers a public key whose derived
/// address matches `address`.
///
/// Every failure mode — malformed Base64, wrong length, an out-of-range
/// `v`, a recovered point off the curve, a failed ECDSA check, or an
/// address mismatch — is caught here and reported as `false`. None of them
/// ever propagate as a distinguishable error, so a caller can't use timing
/// or error variance to learn *why* a forged response was rejected.
pub fn signature_valid(
    address: &str,
    signature: &str,
    bitid_uri: &str,
    is_testnet: bool,
) -> bool {
    match signature_valid_checked(address, signature, bitid_uri, is_testnet) {
        Ok(()) => {
            tracing::debug!(is_testnet, "signature_valid: accepted");
            true
        }
        Err(err) => {
            tracing::trace!(?err, is_testnet, "signature_valid: rejected");
            false
        }
    }
}

/// Full challenge verdict: address format, URI binding, then signature
/// recovery, in that order. Any single failure rejects the whole challenge.
pub fn challenge_valid(
    address: &str,
    signature: &str,
    bitid_uri: &str,
    callback_uri: &str,
    is_testnet: bool,
) -> bool {
    if !address_valid(address, is_testnet) {
        tracing::trace!("challenge_valid: rejected at address_valid");
        return false;
    }
    if !uri_valid(bitid_uri, callback_uri) {
        tracing::trace!("challenge_valid: rejected at uri_valid");
        return false;
    }
    if !signature_valid(address, signature, bitid_uri, is_testnet) {
        tracing::trace!("challenge_valid: rejected at signature_valid");
        return false;
    }
    tracing::debug!("challenge_valid: accepted");
    true
}

/// Convenience wrapper bundling a fixed callback URI and network so an
/// embedding application serving one endpoint doesn't re-pass and re-parse
/// the callback on every request. Every method here forwards to the
/// corresponding free function, which remains the crate's canonical API.
#[derive(Debug, Clone)]
pub struct Verifier {
    callback_uri: String,
    network: Network,
}

impl Verifier {
    pub fn new(callback_uri: impl Into<String>) -> Self {
        Self {
            callback_uri: callback_uri.into(),
            network: Network::Mainnet,
        }
    }

    #[must_use]
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    fn is_testnet(&self) -> bool {
        matches!(self.network, Network::Testnet)
    }

    pub fn build_uri(&self, nonce: Option<&str>) -> Result<String, BitIdError> {
        build_uri(&self.callback_uri, nonce)
    }

    pub fn challenge_valid(&self, address: &str, signature: &str, bitid_uri: &str) -> bool {
        challenge_valid(
            address,
            signature,
            bitid_uri,
            &self.callback_uri,
            self.is_testnet(),
        )
    }

    pub fn signature_valid(&self, address: &str, signature: &str, bitid_uri: &str) -> bool {
        signature_valid(address, signature, bitid_uri, self.is_testnet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET_CALLBACK: &str = "https://localhost:3000/callback";
    const MAINNET_URI: &str = "bitid://localhost:3000/callback?x=fe32e61882a71074";
    const MAINNET_ADDRESS: &str = "1HpE8571PFRwge5coHiFdSCLcwa7qetcn";
    const MAINNET_SIGNATURE: &str = "IPKm1/EZ1AKscpwSZI34F5NiEkpdr7QKHeLOPPSGs6TXJHULs7CSNtjurcfg72HNuKvL2YgNXdOetQRyARhX7bg=";

    const TESTNET_CALLBACK: &str = "http://bitid.bitcoin.blue/callback";
    const TESTNET_URI: &str = "bitid://bitid.bitcoin.blue/callback?x=3893a2a881dd4a1e&u=1";
    const TESTNET_ADDRESS: &str = "mpsaRD2ugdCY1iFrQdsDYRT4qeZzCnvGHW";
    const TESTNET_SIGNATURE: &str = "ID5heI0WOeWoryGhZHaxoOH5vkmmcwDsfc4nDQ5vPcXSWh2jyETDGkSNO5zk4nbESGD6k0tgFxYA3HzlEGOf5Uc=";

    #[test]
    fn mainnet_happy_path() {
        assert!(challenge_valid(
            MAINNET_ADDRESS,
            MAINNET_SIGNATURE,
            MAINNET_URI,
            MAINNET_CALLBACK,
            false
        ));
    }

    #[test]
    fn testnet_happy_path() {
        assert!(challenge_valid(
            TESTNET_ADDRESS,
            TESTNET_SIGNATURE,
            TESTNET_URI,
            TESTNET_CALLBACK,
            true
        ));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let tampered = "H4/hhdnxtXHduvCaA+Vnf0TM4UqdljTsbdIfltwx9+w50gg3mxy8WgLSLIiEjTnxbOPW9sNRzEfjibZXnWEpde4=";
        assert!(!challenge_valid(
            MAINNET_ADDRESS,
            tampered,
            MAINNET_URI,
            MAINNET_CALLBACK,
            false
        ));
    }

    #[test]
    fn garbage_signature_is_rejected_without_panicking() {
        assert!(!challenge_valid(
            MAINNET_ADDRESS,
            "garbage",
            MAINNET_URI,
            MAINNET_CALLBACK,
            false
        ));
    }

    #[test]
    fn uri_path_mismatch_is_rejected() {
        let moved = "bitid://localhost:3000/other?x=fe32e61882a71074";
        assert!(!challenge_valid(
            MAINNET_ADDRESS,
            MAINNET_SIGNATURE,
            moved,
            MAINNET_CALLBACK,
            false
        ));
    }

    #[test]
    fn random_65_byte_signature_never_throws() {
        use base64::Engine;
        let blob = base64::engine::general_purpose::STANDARD.encode([0x42u8; 65]);
        assert!(!signature_valid(MAINNET_ADDRESS, &blob, MAINNET_URI, false));
    }

    #[test]
    fn verifier_wraps_free_functions() {
        let verifier = Verifier::new(MAINNET_CALLBACK);
        assert!(verifier.challenge_valid(MAINNET_ADDRESS, MAINNET_SIGNATURE, MAINNET_URI));

        let testnet_verifier =
            Verifier::new(TESTNET_CALLBACK).with_network(Network::Testnet);
        assert!(testnet_verifier.challenge_valid(TESTNET_ADDRESS, TESTNET_SIGNATURE, TESTNET_URI));
    }
}
