//! End-to-end checks of the library pieces the clients are built from:
//! addresses, local keys, offline signing, configuration and json output.

use aergo_cli::cli::tx::transfer_tx;
use aergo_cli::config::{load_config, CliConfig, ConfigOverrides, PolarisCliConfig};
use aergo_cli::core::address::{decode_address, encode_address};
use aergo_cli::core::monetary::{amount_from_bytes, parse_amount};
use aergo_cli::json::{conv_tx, parse_base58_tx, to_json_string, PayloadEncoding};
use aergo_cli::storage::{KdfSettings, KeyStore};
use aergo_cli::wallet::{address_of, sign_tx, verify_tx};
use aergo_cli::wallet::signer::generate_key;
use std::collections::HashMap;
use tempfile::tempdir;

const FAST_KDF: KdfSettings = KdfSettings {
    memory: 64,
    iterations: 1,
    parallelism: 1,
};

const RECIPIENT: &str = "AmNpn7K9wg6wsn6oMkTirQSUNdqtDm94iCrrpP5ZpwCAAxxPrsU2";

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_keystore_sign_and_verify_offline() {
    let dir = tempdir().unwrap();
    let store = KeyStore::open(dir.path()).unwrap().with_kdf(FAST_KDF);
    let address = store.create("pw").unwrap();
    assert_eq!(store.list().unwrap(), vec![address.clone()]);

    let mut tx = transfer_tx(&encode_address(&address), RECIPIENT, "1.5 aergo").unwrap();
    let key = store.get_key(&address, "pw").unwrap();
    assert_eq!(address_of(&key), address);
    sign_tx(&key, &mut tx).unwrap();
    verify_tx(&tx).unwrap();

    // tampering with the body breaks the signature
    tx.body.as_mut().unwrap().nonce += 1;
    assert!(verify_tx(&tx).is_err());

    assert!(store.get_key(&address, "wrong").is_err());
}

#[test]
fn test_export_import_between_keystores() {
    let from = tempdir().unwrap();
    let to = tempdir().unwrap();
    let source = KeyStore::open(from.path()).unwrap().with_kdf(FAST_KDF);
    let target = KeyStore::open(to.path()).unwrap().with_kdf(FAST_KDF);

    let address = source.create("old").unwrap();
    let exported = source.export(&address, "old").unwrap();
    let imported = target.import(&exported, "old", "new").unwrap();
    assert_eq!(imported, address);
    assert!(target.contains(&address));
    assert!(target.get_key(&address, "new").is_ok());
    assert!(target.get_key(&address, "old").is_err());
}

#[test]
fn test_signed_tx_survives_json() {
    let key = generate_key();
    let sender = encode_address(&address_of(&key));
    let mut tx = transfer_tx(&sender, RECIPIENT, "10 gaer").unwrap();
    sign_tx(&key, &mut tx).unwrap();

    let json = to_json_string(&vec![conv_tx(&tx, PayloadEncoding::Base58)]).unwrap();
    let parsed = parse_base58_tx(json.as_bytes()).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].hash, tx.hash);
    verify_tx(&parsed[0]).unwrap();

    let body = parsed[0].body.as_ref().unwrap();
    assert_eq!(body.recipient, decode_address(RECIPIENT).unwrap());
    assert_eq!(amount_from_bytes(&body.amount), parse_amount("10 gaer").unwrap());
}

#[test]
fn test_config_lifecycle() {
    let dir = tempdir().unwrap();
    let overrides = ConfigOverrides {
        home: Some(dir.path().to_string_lossy().into_owned()),
        ..Default::default()
    };
    let loaded = load_config::<CliConfig>(&overrides, &no_env).unwrap();
    assert!(dir.path().join("cliconfig.toml").is_file());
    assert_eq!(loaded.config, CliConfig::default());

    let env: HashMap<&str, &str> = [("AG_PORT", "7999"), ("AG_HOST", "10.1.1.1")].into();
    let lookup = |name: &str| env.get(name).map(|v| v.to_string());
    let flags = ConfigOverrides {
        port: Some(8000),
        ..overrides.clone()
    };
    let loaded = load_config::<CliConfig>(&flags, &lookup).unwrap();
    assert_eq!(loaded.config.host, "10.1.1.1");
    assert_eq!(loaded.config.port, 8000);

    let polaris = load_config::<PolarisCliConfig>(&overrides, &no_env).unwrap();
    assert!(dir.path().join("polariscliconfig.toml").is_file());
    assert_eq!(polaris.config.port, 8915);
}
