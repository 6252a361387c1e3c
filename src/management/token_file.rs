use std::path::{Path, PathBuf};

use crate::{
    config,
    error::{Error, Result},
    types::Token,
};

/// The single file a session token is persisted to.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token.
    ///
    /// A missing file and a file that does not parse are both reported as
    /// `Error::NotFound`: either way there is no usable session and the caller
    /// has to authorize again.
    pub async fn load(&self) -> Result<Token> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|_| Error::NotFound)?;
        let token: Token = serde_json::from_str(&content).map_err(|e| {
            tracing::warn!(path = %self.path.display(), "ignoring unreadable token file: {}", e);
            Error::NotFound
        })?;
        if token.access_token.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(token)
    }

    /// Writes `token` as pretty JSON, creating parent directories as needed.
    pub async fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(token)?;
        async_fs::write(&self.path, json).await?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }
}

impl Default for TokenFile {
    fn default() -> Self {
        TokenFile::new(config::token_path())
    }
}
