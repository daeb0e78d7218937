pub mod catalog;
pub mod clear;
pub mod init;
pub mod list;
pub mod record;
pub mod trend;

use std::path::{Path, PathBuf};

use anyhow::Result;

use mocktrack_core::config::{load_config_from, MocktrackConfig};
use mocktrack_core::session::Session;
use mocktrack_core::store::FileStore;

/// Options shared by every command that touches the ledger.
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl GlobalOpts {
    /// Load config, applying the `--data-dir` override.
    pub fn load_config(&self) -> Result<MocktrackConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }
}

pub fn open_session(data_dir: &Path) -> Result<Session> {
    tracing::debug!(data_dir = %data_dir.display(), "opening ledger");
    Session::open(Box::new(FileStore::new(data_dir)))
}

/// Output format for commands that print ledger data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}
