//! Harvester engine: fetching, extraction, persistence and the worker pool.
mod decode;
mod engine;
mod extract;
mod fetch;
mod filename;
mod persist;
mod pipeline;
mod settings;
mod types;

pub use decode::{decode_document, DecodedDocument};
pub use engine::{HarvestError, Harvester};
pub use extract::ScriptResourceExtractor;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{artifact_filename, random_token, TokenAlphabet, TOKEN_LEN};
pub use persist::{ensure_output_dir, ArtifactStore, PersistError};
pub use settings::{HarvestMode, HarvestSettings};
pub use types::{
    Failure, FailureKind, FetchError, FetchMetadata, FetchOutput, FetchTarget, PageOutcome,
    PageReport, ResourceReport, RunReport, Stage,
};
