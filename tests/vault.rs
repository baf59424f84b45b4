use std::fs;

use speechkeys::{Vault, VaultError, text_to_sequence};

mod support;
use support::{FAST_KDF, temp_vault};

#[test]
fn test_store_then_retrieve() {
    let (_dir, vault) = temp_vault();
    vault.store("enx", "test db", "secret1", "pass1").unwrap();
    let keys = vault.retrieve("enx", "test db", "pass1").unwrap();
    assert_eq!(keys, text_to_sequence("secret1").unwrap());
}

#[test]
fn test_wrong_passphrase() {
    let (_dir, vault) = temp_vault();
    vault.store("enx", "test db", "secret1", "pass1").unwrap();
    assert!(matches!(
        vault.retrieve("enx", "test db", "pass2"),
        Err(VaultError::WrongPassphrase)
    ));
}

#[test]
fn test_second_store_is_refused() {
    let (_dir, vault) = temp_vault();
    vault.store("enx", "test db", "secret1", "pass1").unwrap();
    assert!(matches!(
        vault.store("enx", "test db", "other", "pass2"),
        Err(VaultError::AlreadyExists { .. })
    ));
    // The original record is untouched.
    assert!(vault.retrieve("enx", "test db", "pass1").is_ok());
}

#[test]
fn test_missing_secret() {
    let (_dir, vault) = temp_vault();
    assert!(matches!(
        vault.retrieve("enx", "nothing", "pass1"),
        Err(VaultError::NotFound { .. })
    ));
    assert!(matches!(
        vault.remove("enx", "nothing"),
        Err(VaultError::NotFound { .. })
    ));
}

#[test]
fn test_locales_are_separate() {
    let (_dir, vault) = temp_vault();
    vault.store("enx", "mail", "a", "pass").unwrap();
    vault.store("nld", "mail", "b", "pass").unwrap();
    assert_eq!(vault.retrieve("nld", "mail", "pass").unwrap().to_string(), "b");
    assert_eq!(vault.retrieve("enx", "mail", "pass").unwrap().to_string(), "a");
}

#[test]
fn test_layout_on_disk() {
    let (dir, vault) = temp_vault();
    vault.store("enx", "test db", "secret1", "pass1").unwrap();

    let path = dir.path().join("enx").join("test_db");
    assert_eq!(vault.record_path("enx", "test db").unwrap(), path);
    let bytes = fs::read(&path).unwrap();
    assert!(!bytes.windows(7).any(|w| w == b"secret1"));
}

#[test]
fn test_names_round_trip() {
    let (_dir, vault) = temp_vault();
    assert!(vault.names("enx").unwrap().is_empty());
    for name in ["web mail", "bank", "test db"] {
        vault.store("enx", name, "x", "p").unwrap();
    }
    assert_eq!(vault.names("enx").unwrap(), vec!["bank", "test db", "web mail"]);

    vault.remove("enx", "bank").unwrap();
    assert_eq!(vault.names("enx").unwrap(), vec!["test db", "web mail"]);
    vault.store("enx", "bank", "y", "p").unwrap();
    assert_eq!(vault.retrieve("enx", "bank", "p").unwrap().to_string(), "y");
}

#[test]
fn test_corrupt_record() {
    let (_dir, vault) = temp_vault();
    vault.store("enx", "short", "x", "p").unwrap();
    let path = vault.record_path("enx", "short").unwrap();

    fs::write(&path, b"SPV1").unwrap();
    assert!(matches!(
        vault.retrieve("enx", "short", "p"),
        Err(VaultError::Corrupt { .. })
    ));

    fs::write(&path, b"not a record at all, just some text").unwrap();
    assert!(matches!(
        vault.retrieve("enx", "short", "p"),
        Err(VaultError::Corrupt { .. })
    ));
}

#[test]
fn test_tampered_record_fails_authentication() {
    let (_dir, vault) = temp_vault();
    vault.store("enx", "mail", "secret", "p").unwrap();
    let path = vault.record_path("enx", "mail").unwrap();
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(&path, bytes).unwrap();
    assert!(matches!(
        vault.retrieve("enx", "mail", "p"),
        Err(VaultError::WrongPassphrase)
    ));
}

#[test]
fn test_oversized_kdf_cost_in_header() {
    let (_dir, vault) = temp_vault();
    vault.store("enx", "mail", "secret", "p").unwrap();
    let path = vault.record_path("enx", "mail").unwrap();
    let mut bytes = fs::read(&path).unwrap();
    // log_n follows the four magic bytes.
    bytes[4] = 40;
    fs::write(&path, bytes).unwrap();
    assert!(matches!(
        vault.retrieve("enx", "mail", "p"),
        Err(VaultError::Corrupt { .. })
    ));
}

#[test]
fn test_invalid_names() {
    let (_dir, vault) = temp_vault();
    for name in ["", "..", "a/b", "."] {
        assert!(
            matches!(
                vault.store("enx", name, "x", "p"),
                Err(VaultError::InvalidName(_))
            ),
            "{name:?} accepted"
        );
    }
    assert!(matches!(
        vault.store("../enx", "x", "x", "p"),
        Err(VaultError::InvalidName(_))
    ));
}

#[test]
fn test_untypeable_secret_is_refused() {
    let (_dir, vault) = temp_vault();
    assert!(matches!(
        vault.store("enx", "mail", "naïve", "p"),
        Err(VaultError::Encode(_))
    ));
    assert!(!vault.contains("enx", "mail").unwrap());
}

#[test]
fn test_kdf_parameters_travel_with_the_record() {
    let dir = tempfile::tempdir().unwrap();
    Vault::new(dir.path())
        .with_kdf(FAST_KDF)
        .store("enx", "mail", "abc", "p")
        .unwrap();
    // A vault configured with the default cost still opens the record.
    let keys = Vault::new(dir.path()).retrieve("enx", "mail", "p").unwrap();
    assert_eq!(keys.to_string(), "a,b,c");
}
