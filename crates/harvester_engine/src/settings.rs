use std::path::PathBuf;

use harvester_core::LibraryFilter;

use crate::fetch::FetchSettings;
use crate::filename::TokenAlphabet;

/// Which artifacts a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestMode {
    /// Only the non-library scripts of each page.
    ScriptsOnly,
    /// The page HTML itself plus its non-library scripts.
    FullPage,
}

impl HarvestMode {
    pub fn default_output_dir(self) -> &'static str {
        match self {
            HarvestMode::ScriptsOnly => "js-files",
            HarvestMode::FullPage => "fetched-webpages",
        }
    }

    pub fn token_alphabet(self) -> TokenAlphabet {
        match self {
            HarvestMode::ScriptsOnly => TokenAlphabet::Alphanumeric,
            HarvestMode::FullPage => TokenAlphabet::LowercaseAlphanumeric,
        }
    }

    pub fn persists_pages(self) -> bool {
        matches!(self, HarvestMode::FullPage)
    }
}

#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub mode: HarvestMode,
    pub output_dir: PathBuf,
    /// Worker threads; `0` is treated as `1`.
    pub workers: usize,
    pub libraries: LibraryFilter,
    pub fetch: FetchSettings,
}

impl HarvestSettings {
    pub fn for_mode(mode: HarvestMode) -> Self {
        Self {
            mode,
            output_dir: PathBuf::from(mode.default_output_dir()),
            workers: 1,
            libraries: LibraryFilter::default(),
            fetch: FetchSettings::default(),
        }
    }
}
