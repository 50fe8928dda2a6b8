// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Vault key envelope: generate, wrap, unwrap and re-wrap the vault key.

use chrono::{DateTime, Utc};
use keep_aead::{CryptoProvider, DecryptionError};
use keep_kdf::{KdfVersion, SALT_LEN};
use keep_secret::SecretString;

use crate::consts::WRAP_AAD;
use crate::error::{SessionError, UnlockError};
use crate::models::{VaultEnvelope, VaultKey, WrappedVaultKey};

/// Creates a new vault: fresh salt, fresh random vault key, wrapped under
/// `password`.
///
/// Returns the envelope to persist and the plaintext vault key.
///
/// # Errors
///
/// - [`SessionError::Entropy`] if the salt or key cannot be drawn.
/// - [`SessionError::Derivation`] on an empty password.
/// - [`SessionError::Encryption`] if wrapping fails.
pub fn create_vault<C>(
    crypto: &C,
    password: &SecretString,
    version: KdfVersion,
) -> Result<(VaultEnvelope, VaultKey), SessionError>
where
    C: CryptoProvider + ?Sized,
{
    let mut key = VaultKey::zeroed();
    crypto.random_bytes(key.expose_mut())?;

    let envelope = rewrap_vault(crypto, password, &key, version, Utc::now())?;

    Ok((envelope, key))
}

/// Wraps an existing vault key under `password` with a fresh salt.
///
/// Used for password changes. Records stay encrypted under the same key.
///
/// # Errors
///
/// As for [`create_vault`].
pub fn rewrap_vault<C>(
    crypto: &C,
    password: &SecretString,
    key: &VaultKey,
    version: KdfVersion,
    created_at: DateTime<Utc>,
) -> Result<VaultEnvelope, SessionError>
where
    C: CryptoProvider + ?Sized,
{
    let mut salt = [0u8; SALT_LEN];
    crypto.random_bytes(&mut salt)?;

    let wrapping_key = crypto.kdf_derive(password.as_bytes(), &salt, version)?;
    let sealed = keep_aead::encrypt(crypto, &wrapping_key, WRAP_AAD, key.expose())?;

    Ok(VaultEnvelope {
        salt: salt.to_vec(),
        wrapped_key: WrappedVaultKey {
            ciphertext: sealed.ciphertext,
            nonce: sealed.nonce.to_vec(),
        },
        kdf_version: version.as_u32(),
        created_at,
        updated_at: Utc::now(),
    })
}

/// Recovers the vault key from its envelope.
///
/// Needs nothing but the password and the envelope.
///
/// # Errors
///
/// - [`SessionError::Unlock`] for a wrong password or any damaged envelope
///   field. The two cases are only told apart in debug logs.
/// - [`SessionError::Derivation`] on an empty password or an unknown KDF
///   version.
pub fn unwrap_vault<C>(
    crypto: &C,
    password: &SecretString,
    envelope: &VaultEnvelope,
) -> Result<VaultKey, SessionError>
where
    C: CryptoProvider + ?Sized,
{
    let version = KdfVersion::from_u32(envelope.kdf_version)?;

    let Ok(salt) = <[u8; SALT_LEN]>::try_from(envelope.salt.as_slice()) else {
        tracing::debug!(len = envelope.salt.len(), "malformed envelope: salt length");
        return Err(UnlockError::InvalidCredentialsOrCorruptVault.into());
    };

    let wrapping_key = crypto.kdf_derive(password.as_bytes(), &salt, version)?;

    let plaintext = keep_aead::decrypt(
        crypto,
        &wrapping_key,
        WRAP_AAD,
        &envelope.wrapped_key.ciphertext,
        &envelope.wrapped_key.nonce,
    )
    .map_err(|e| {
        match e {
            DecryptionError::AuthenticationFailed => {
                tracing::debug!("vault key unwrap: tag mismatch");
            }
            DecryptionError::InvalidNonceSize(len) => {
                tracing::debug!(len, "malformed envelope: nonce length");
            }
        }
        UnlockError::InvalidCredentialsOrCorruptVault
    })?;

    VaultKey::try_from_slice(&plaintext).ok_or_else(|| {
        tracing::debug!(len = plaintext.len(), "malformed envelope: vault key length");
        UnlockError::InvalidCredentialsOrCorruptVault.into()
    })
}
