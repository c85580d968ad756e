//! Terminal client that polls the backend and keeps a live view of the
//! tracked satellite.

mod client;
mod error;
mod poller;
mod state;
mod view;

pub use client::{BackendClient, Target};
pub use error::WatchError;
pub use poller::{WatchOptions, Watcher};
pub use state::{HistoryEntry, PositionsUpdate, TrackState, LOADING_LOCATION};
pub use view::{is_centered, Coordinates, CENTER_TOLERANCE_DEG};
