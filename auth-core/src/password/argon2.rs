use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Memory-hard password hashing (Argon2id, PHC string format).
///
/// Verification goes through the algorithm's own constant-time comparison;
/// hashes are never compared byte-for-byte.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the default cost parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes over the memory
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are out of range for Argon2
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls on the same input yield different strings; callers must not
    /// assume determinism.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC-format hash.
    ///
    /// Cost parameters are taken from the hash string itself, so hashes
    /// produced under older settings keep verifying after a cost change.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a parseable PHC string; callers
    ///   treat this the same as a failed verification
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
