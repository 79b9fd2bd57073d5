//! RSA-based token signature implementations (RS256, RS384, RS512)

use super::Algorithm;
use crate::error::{AccessError, AccessResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Sign `message` (the `header.claims` signing input) with `alg`
pub(crate) fn sign(alg: Algorithm, message: &str, key: &RsaPrivateKey) -> AccessResult<Vec<u8>> {
    let signature = match alg {
        Algorithm::Rs256 => SigningKey::<Sha256>::new(key.clone()).try_sign(message.as_bytes()),
        Algorithm::Rs384 => SigningKey::<Sha384>::new(key.clone()).try_sign(message.as_bytes()),
        Algorithm::Rs512 => SigningKey::<Sha512>::new(key.clone()).try_sign(message.as_bytes()),
    }
    .map_err(|e| AccessError::Signing(format!("{alg} signing failed: {e}")))?;

    Ok(signature.to_vec())
}

/// Verify an `alg` signature over `message`.
///
/// Every failure, including a signature of the wrong length, is reported as
/// `InvalidSignature`.
pub(crate) fn verify(
    alg: Algorithm,
    message: &str,
    signature: &[u8],
    key: &RsaPublicKey,
) -> AccessResult<()> {
    let signature = Signature::try_from(signature).map_err(|_| AccessError::InvalidSignature)?;

    let outcome = match alg {
        Algorithm::Rs256 => {
            VerifyingKey::<Sha256>::new(key.clone()).verify(message.as_bytes(), &signature)
        }
        Algorithm::Rs384 => {
            VerifyingKey::<Sha384>::new(key.clone()).verify(message.as_bytes(), &signature)
        }
        Algorithm::Rs512 => {
            VerifyingKey::<Sha512>::new(key.clone()).verify(message.as_bytes(), &signature)
        }
    };

    outcome.map_err(|_| AccessError::InvalidSignature)
}
