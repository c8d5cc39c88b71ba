use crate::config::ConfigError;
use crate::store::StoreError;

/// Everything that can stop the program.  The simulation itself never
/// fails; these come from its surroundings.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("high score store: {0}")]
    Store(#[from] StoreError),

    #[error("terminal: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
