/// One-way salted password hashing for user credentials.
///
/// Every call to [`PasswordHasher::hash`] draws a fresh random salt, so two
/// hashes of the same password never compare equal as strings.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password, self.cost)
    }

    /// A missing or unparseable stored hash never verifies.
    pub fn verify(&self, password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => bcrypt::verify(password, hash).unwrap_or(false),
            None => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn verifies_own_hash() {
        let h = hasher();
        for password in ["secret", "", "pässwörd", "a much longer passphrase with spaces"] {
            let hash = h.hash(password).unwrap();
            assert!(h.verify(password, Some(&hash)), "failed for {:?}", password);
        }
    }

    #[test]
    fn rejects_other_passwords() {
        let h = hasher();
        let hash = h.hash("secret").unwrap();
        assert!(!h.verify("Secret", Some(&hash)));
        assert!(!h.verify("secret ", Some(&hash)));
        assert!(!h.verify("", Some(&hash)));
    }

    #[test]
    fn salts_every_hash() {
        let h = hasher();
        let a = h.hash("secret").unwrap();
        let b = h.hash("secret").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, "secret");
    }

    #[test]
    fn missing_or_garbage_hash_never_verifies() {
        let h = hasher();
        assert!(!h.verify("secret", None));
        assert!(!h.verify("secret", Some("not-a-bcrypt-hash")));
    }
}
