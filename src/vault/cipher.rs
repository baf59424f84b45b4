//! Passphrase sealing for secret records.
//!
//! Record layout: `SPV1`, scrypt `log_n` (u8), `r` (u32 LE), `p` (u32 LE),
//! 16-byte salt, 12-byte nonce, ChaCha20-Poly1305 ciphertext. Everything
//! before the ciphertext is authenticated as associated data.

use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, KeyInit, Payload},
};
use rand_core::{CryptoRng, RngCore};
use scrypt::{
    Params as ScryptParams,
    errors::{InvalidOutputLen, InvalidParams},
};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const MAGIC: &[u8; 4] = b"SPV1";
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const HEADER_LEN: usize = MAGIC.len() + 1 + 4 + 4 + SALT_LEN + NONCE_LEN;

/// Prefix sealed together with every secret. Finding it after decryption
/// proves the passphrase was right.
pub(crate) const TAG: &[u8] = b"SUCC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CipherError {
    Truncated,
    BadMagic,
    InvalidParameters,
    /// Header asks for more key derivation work than any record we write.
    ExcessiveCost,
    InvalidOutput,
    Authentication,
}

impl From<InvalidParams> for CipherError {
    fn from(_: InvalidParams) -> Self {
        CipherError::InvalidParameters
    }
}

impl From<InvalidOutputLen> for CipherError {
    fn from(_: InvalidOutputLen) -> Self {
        CipherError::InvalidOutput
    }
}

impl From<chacha20poly1305::aead::Error> for CipherError {
    fn from(_: chacha20poly1305::aead::Error) -> Self {
        CipherError::Authentication
    }
}

/// Cost parameters for deriving a key from a spoken passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            log_n: 14,
            r: 8,
            p: 1,
        }
    }
}

impl KdfParams {
    /// Highest cost accepted from a record header, about 1 GiB of scrypt
    /// memory. Headers are read before anything is authenticated.
    pub const MAX: KdfParams = KdfParams {
        log_n: 20,
        r: 8,
        p: 4,
    };

    pub fn within_max(&self) -> bool {
        self.log_n <= Self::MAX.log_n && self.r <= Self::MAX.r && self.p <= Self::MAX.p
    }

    fn to_scrypt(self) -> Result<ScryptParams, CipherError> {
        ScryptParams::new(self.log_n, self.r, self.p).map_err(Into::into)
    }
}

#[derive(Zeroize, ZeroizeOnDrop)]
struct SealingKey([u8; 32]);

impl SealingKey {
    fn derive(passphrase: &[u8], salt: &[u8], params: KdfParams) -> Result<Self, CipherError> {
        let mut key = SealingKey([0u8; 32]);
        let passphrase = Zeroizing::new(passphrase.to_vec());
        scrypt::scrypt(&passphrase, salt, &params.to_scrypt()?, &mut key.0)?;
        Ok(key)
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new(Key::from_slice(&self.0))
    }
}

fn header(params: KdfParams, salt: &[u8; SALT_LEN], nonce: &[u8; NONCE_LEN]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN);
    out.extend_from_slice(MAGIC);
    out.push(params.log_n);
    out.extend_from_slice(&params.r.to_le_bytes());
    out.extend_from_slice(&params.p.to_le_bytes());
    out.extend_from_slice(salt);
    out.extend_from_slice(nonce);
    out
}

/// Encrypt `TAG + secret` under a key derived from `passphrase`.
pub(crate) fn seal<R: RngCore + CryptoRng>(
    passphrase: &[u8],
    secret: &[u8],
    params: KdfParams,
    rng: &mut R,
) -> Result<Vec<u8>, CipherError> {
    if !params.within_max() {
        return Err(CipherError::InvalidParameters);
    }
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);

    let key = SealingKey::derive(passphrase, &salt, params)?;

    let mut plaintext = Zeroizing::new(Vec::with_capacity(TAG.len() + secret.len()));
    plaintext.extend_from_slice(TAG);
    plaintext.extend_from_slice(secret);

    let mut record = header(params, &salt, &nonce);
    let ciphertext = key.cipher().encrypt(
        Nonce::from_slice(&nonce),
        Payload {
            msg: &plaintext,
            aad: &record,
        },
    )?;
    record.extend_from_slice(&ciphertext);
    Ok(record)
}

/// Decrypt a record. Returns the plaintext including the tag; the caller
/// checks the tag.
pub(crate) fn open(passphrase: &[u8], record: &[u8]) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    if record.len() < HEADER_LEN {
        return Err(CipherError::Truncated);
    }
    let (head, ciphertext) = record.split_at(HEADER_LEN);
    if &head[..MAGIC.len()] != MAGIC {
        return Err(CipherError::BadMagic);
    }

    let mut cursor = MAGIC.len();
    let log_n = head[cursor];
    cursor += 1;
    let r = read_u32(&head[cursor..cursor + 4]);
    cursor += 4;
    let p = read_u32(&head[cursor..cursor + 4]);
    cursor += 4;
    let salt = &head[cursor..cursor + SALT_LEN];
    cursor += SALT_LEN;
    let nonce = &head[cursor..cursor + NONCE_LEN];

    let params = KdfParams { log_n, r, p };
    if !params.within_max() {
        return Err(CipherError::ExcessiveCost);
    }
    let key = SealingKey::derive(passphrase, salt, params)?;
    let plaintext = key.cipher().decrypt(
        Nonce::from_slice(nonce),
        Payload {
            msg: ciphertext,
            aad: head,
        },
    )?;
    Ok(Zeroizing::new(plaintext))
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}
