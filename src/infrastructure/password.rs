//! Password digests compatible with the CRM that issues the credentials.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the UTF-8 password, unsalted.
pub fn password_digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Whether a stored hash can ever equal a [`password_digest`]. Newer CRM builds
/// rewrite hashes as bcrypt, which never does.
pub fn is_password_digest(hash: &str) -> bool {
    hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit())
}
