//! End-to-end challenge scenarios, exercised through the public API only.

use bitid::{address_valid, build_uri, challenge_valid, extract_nonce, qrcode, uri_valid};
use rstest::rstest;

struct Scenario {
    callback: &'static str,
    bitid_uri: &'static str,
    address: &'static str,
    signature: &'static str,
    testnet: bool,
}

const MAINNET: Scenario = Scenario {
    callback: "https://localhost:3000/callback",
    bitid_uri: "bitid://localhost:3000/callback?x=fe32e61882a71074",
    address: "1HpE8571PFRwge5coHiFdSCLcwa7qetcn",
    signature: "IPKm1/EZ1AKscpwSZI34F5NiEkpdr7QKHeLOPPSGs6TXJHULs7CSNtjurcfg72HNuKvL2YgNXdOetQRyARhX7bg=",
    testnet: false,
};

const TESTNET: Scenario = Scenario {
    callback: "http://bitid.bitcoin.blue/callback",
    bitid_uri: "bitid://bitid.bitcoin.blue/callback?x=3893a2a881dd4a1e&u=1",
    address: "mpsaRD2ugdCY1iFrQdsDYRT4qeZzCnvGHW",
    signature: "ID5heI0WOeWoryGhZHaxoOH5vkmmcwDsfc4nDQ5vPcXSWh2jyETDGkSNO5zk4nbESGD6k0tgFxYA3HzlEGOf5Uc=",
    testnet: true,
};

#[rstest]
#[case::mainnet(MAINNET)]
#[case::testnet(TESTNET)]
fn full_challenge_round_trip_accepts_a_genuine_response(#[case] scenario: Scenario) {
    assert!(address_valid(scenario.address, scenario.testnet));
    assert!(uri_valid(scenario.bitid_uri, scenario.callback));
    assert!(challenge_valid(
        scenario.address,
        scenario.signature,
        scenario.bitid_uri,
        scenario.callback,
        scenario.testnet,
    ));
}

#[rstest]
#[case::mainnet(MAINNET)]
#[case::testnet(TESTNET)]
fn wrong_network_flag_is_rejected(#[case] scenario: Scenario) {
    assert!(!challenge_valid(
        scenario.address,
        scenario.signature,
        scenario.bitid_uri,
        scenario.callback,
        !scenario.testnet,
    ));
}

#[test]
fn a_freshly_built_challenge_is_self_consistent() {
    let callback = "https://example.com/auth/callback";
    let challenge = build_uri(callback, None).unwrap();

    assert!(uri_valid(&challenge, callback));
    let nonce = extract_nonce(&challenge).unwrap();
    assert_eq!(nonce.len(), 16);

    // Nobody signed this challenge, so no address can satisfy it.
    assert!(!challenge_valid(
        "1HpE8571PFRwge5coHiFdSCLcwa7qetcn",
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=",
        &challenge,
        callback,
        false,
    ));
}

#[test]
fn a_freshly_built_challenge_can_be_turned_into_a_qrcode_url() {
    let callback = "https://example.com/auth/callback";
    let challenge = build_uri(callback, Some("deadbeefdeadbeef")).unwrap();
    let url = qrcode(&challenge);
    assert!(url.starts_with("http://chart.apis.google.com/chart?cht=qr&chs=300x300&chl="));
    assert!(!url.contains(' '));
}

#[test]
fn a_stale_callback_does_not_validate_a_live_challenge() {
    let challenge = build_uri("https://example.com/callback", Some("abc123")).unwrap();
    assert!(!uri_valid(&challenge, "https://example.com/other-path"));
}
