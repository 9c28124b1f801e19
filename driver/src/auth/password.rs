use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use error_stack::Report;
use rand::rngs::OsRng;

use kernel::interface::auth::PasswordHashing;
use kernel::prelude::entity::{HashedPassword, RawPassword};
use kernel::KernelError;

/// Argon2id with a random salt, stored in PHC string format.
#[derive(Clone, Default)]
pub struct Argon2PasswordHashing;

impl PasswordHashing for Argon2PasswordHashing {
    fn hash(&self, password: &RawPassword) -> error_stack::Result<HashedPassword, KernelError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_ref().as_bytes(), &salt)
            .map_err(|error| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("failed to hash password: {error}"))
            })?;
        Ok(HashedPassword::new(hash.to_string()))
    }

    fn verify(
        &self,
        password: &RawPassword,
        hashed: &HashedPassword,
    ) -> error_stack::Result<bool, KernelError> {
        let parsed = PasswordHash::new(hashed.as_ref()).map_err(|error| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("stored password hash is malformed: {error}"))
        })?;
        match Argon2::default().verify_password(password.as_ref().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(error) => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("failed to verify password: {error}"))),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::auth::PasswordHashing;
    use kernel::prelude::entity::RawPassword;

    use super::Argon2PasswordHashing;

    #[test]
    fn verifies_only_the_hashed_password() {
        let hashing = Argon2PasswordHashing;
        let password = RawPassword::new("correct horse").unwrap();
        let hashed = hashing.hash(&password).unwrap();
        assert!(!hashed.as_ref().contains("correct horse"));
        assert!(hashing.verify(&password, &hashed).unwrap());

        let wrong = RawPassword::new("wrong horse").unwrap();
        assert!(!hashing.verify(&wrong, &hashed).unwrap());
    }

    #[test]
    fn salts_every_hash() {
        let hashing = Argon2PasswordHashing;
        let password = RawPassword::new("correct horse").unwrap();
        let first = hashing.hash(&password).unwrap();
        let second = hashing.hash(&password).unwrap();
        assert_ne!(first, second);
    }
}
