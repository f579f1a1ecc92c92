//! Server state and configuration.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::delivery::Deliverer;
use crate::receipt::ShopProfile;

/// Default listen port for the print endpoint.
pub const DEFAULT_PORT: u16 = 35625;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:35625")
    pub listen_addr: String,
    /// Shared secret every print request must carry
    pub secret_key: String,
}

impl ServerConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            secret_key: secret_key.into(),
        }
    }

    /// Check a client-supplied secret in constant time.
    ///
    /// Both sides are MACed under the configured secret and the tags are
    /// compared with [`Mac::verify_slice`], so timing depends on neither
    /// the content nor the length of `candidate`.
    pub fn secret_matches(&self, candidate: &str) -> bool {
        let Ok(expected) = self.mac(self.secret_key.as_bytes()) else {
            return false;
        };
        match self.mac(candidate.as_bytes()) {
            Ok(mac) => mac.verify_slice(&expected.finalize().into_bytes()).is_ok(),
            Err(_) => false,
        }
    }

    fn mac(&self, message: &[u8]) -> Result<Hmac<Sha256>, hmac::digest::InvalidLength> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret_key.as_bytes())?;
        mac.update(message);
        Ok(mac)
    }
}

/// Application state shared across handlers.
pub struct AppState<S> {
    pub config: ServerConfig,
    pub profile: ShopProfile,
    pub deliverer: Deliverer<S>,
}

impl<S> AppState<S> {
    pub fn new(config: ServerConfig, profile: ShopProfile, deliverer: Deliverer<S>) -> Self {
        Self {
            config,
            profile,
            deliverer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matches_exact_value_only() {
        let config = ServerConfig::new("s3cret");
        assert!(config.secret_matches("s3cret"));
        assert!(!config.secret_matches("s3creT"));
        assert!(!config.secret_matches("s3cre"));
        assert!(!config.secret_matches("s3cret "));
        assert!(!config.secret_matches(""));
    }

    #[test]
    fn test_empty_secret_matches_only_empty() {
        let config = ServerConfig::new("");
        assert!(config.secret_matches(""));
        assert!(!config.secret_matches("x"));
    }
}
