#![allow(dead_code)]

use speechkeys::{KdfParams, Vault};
use tempfile::TempDir;

/// Cheap key derivation so tests do not spend seconds in scrypt.
pub const FAST_KDF: KdfParams = KdfParams {
    log_n: 4,
    r: 8,
    p: 1,
};

/// A vault rooted in a fresh temporary directory. Keep the `TempDir`
/// alive for as long as the vault is used.
pub fn temp_vault() -> (TempDir, Vault) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let vault = Vault::new(dir.path()).with_kdf(FAST_KDF);
    (dir, vault)
}

pub fn tokens(keys: &speechkeys::KeySequence) -> Vec<String> {
    keys.tokens()
}
