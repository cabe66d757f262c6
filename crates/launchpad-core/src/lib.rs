//! Launchpad core
//!
//! The authentication flow of the Launchpad app launcher, independent of any
//! user interface:
//!
//! - [`gate`]: four-digit keypad with delayed validation and a
//!   self-clearing error
//! - [`transition`]: fixed loading delay after unlock
//! - [`flow`]: the `Gate -> Transitioning -> Active` state machine
//! - [`session`] and [`store`]: the persisted "authenticated" flag and the
//!   string store behind it
//! - [`catalog`], [`carousel`] and [`navigation`]: dashboard tiles and
//!   opening them
//!
//! Nothing here spawns threads or sleeps. Deferred work is a deadline that
//! the host drives through [`FlowController::tick`].

pub mod carousel;
pub mod catalog;
pub mod credential;
pub mod error;
pub mod flow;
pub mod gate;
pub mod navigation;
pub mod session;
pub mod store;
pub mod timer;
pub mod transition;

pub use carousel::Carousel;
pub use catalog::{Accent, Tile, TileCatalog, TILES_PER_PAGE};
pub use credential::{
    Credential, CredentialVerifier, HashedVerifier, PlainVerifier, StoredSecretVerifier,
};
pub use error::{LaunchpadError, Result};
pub use flow::{FlowController, FlowEvent, FlowTimings, ScreenState};
pub use gate::{Gate, GateSignal};
pub use navigation::{Launcher, Navigator, RecordingNavigator, SystemNavigator};
pub use session::{KvSessionStore, SessionStore};
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use transition::Transition;
