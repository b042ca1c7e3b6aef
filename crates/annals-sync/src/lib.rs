//! Manual backup and restore of whole collections.
//!
//! A single remote JSON resource (a GitHub gist) holds one file per
//! collection. [`Syncer::pull`] replaces the local collection with the remote
//! copy; [`Syncer::push`] overwrites the remote copy with the local one and
//! falls back to a local export file whenever the remote cannot be written.
//! There is no merging: the last writer wins.

pub mod error;
pub mod export;
pub mod gist;
pub mod syncer;

pub use error::{Error, Result};
pub use gist::{GistClient, RemoteConfig};
pub use syncer::{FallbackReason, PushOutcome, Syncer};
