//! Harvester core: pure, I/O-free pieces shared by the engine and the tools.
mod frontier;
mod library;
mod provenance;
mod seeds;

pub use frontier::{Claim, Frontier};
pub use library::{LibraryFilter, DEFAULT_LIBRARIES};
pub use provenance::{ArtifactKind, Provenance};
pub use seeds::parse_seed_lines;
