use crate::error::CredentialError;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One app's OAuth 1.0a secrets.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credential {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***REDACTED***")
            .field("access_token", &"***REDACTED***")
            .field("access_token_secret", &"***REDACTED***")
            .finish()
    }
}

/// Ordered credentials read from a keys file.
///
/// Format: blocks of exactly four lines (consumer key, consumer secret,
/// access token, access token secret) separated by blank lines. Lines
/// starting with `#` are ignored.
#[derive(Debug)]
pub struct CredentialStore {
    credentials: Vec<Credential>,
}

impl CredentialStore {
    pub const DEFAULT_KEYS_FILE: &'static str = "keys.txt";

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CredentialError::FileNotFound {
                path: origin.clone(),
            },
            _ => CredentialError::IoError {
                path: origin.clone(),
                msg: e.to_string(),
            },
        })?;

        let store = Self::parse(&content, &origin)?;
        info!("Loaded {} credential sets from {}", store.count(), origin);
        Ok(store)
    }

    pub fn parse(content: &str, origin: &str) -> Result<Self, CredentialError> {
        let mut credentials = Vec::new();
        let mut block: Vec<&str> = Vec::with_capacity(4);
        let mut block_start = 0;

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if trimmed.is_empty() {
                Self::flush(&mut block, block_start, &mut credentials)?;
                continue;
            }
            if block.is_empty() {
                block_start = idx + 1;
            }
            block.push(trimmed);
        }
        Self::flush(&mut block, block_start, &mut credentials)?;

        if credentials.is_empty() {
            return Err(CredentialError::Empty {
                path: origin.to_string(),
            });
        }

        Ok(Self { credentials })
    }

    fn flush(
        block: &mut Vec<&str>,
        line: usize,
        out: &mut Vec<Credential>,
    ) -> Result<(), CredentialError> {
        match block.as_slice() {
            [] => return Ok(()),
            [ck, cs, at, ats] => out.push(Credential::new(*ck, *cs, *at, *ats)),
            other => {
                return Err(CredentialError::MalformedBlock {
                    line,
                    found: other.len(),
                })
            }
        }
        block.clear();
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.credentials.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }

    pub fn into_credentials(self) -> Vec<Credential> {
        self.credentials
    }
}
