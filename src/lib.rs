pub mod canvas;
pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod error;
pub mod registry;
pub mod spawn;
pub mod stage;
pub mod store;

pub use canvas::{Canvas, PressRegistration, Surface};
pub use compute::{GameState, TickOutcome};
pub use config::{ConfigError, GameConfig};
pub use driver::{Cadence, Driver, FrameOutcome, Phase};
pub use entities::{Entity, EntityKind, Position, Size, Sprite};
pub use error::{Error, Result};
pub use registry::{EntityId, Registry};
pub use stage::Stage;
pub use store::{FileScoreStore, MemoryScoreStore, ScoreStore, StoreError};
