use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info, engine_warn};
use harvester_core::{ArtifactKind, LibraryFilter, Provenance};

use crate::extract::ScriptResourceExtractor;
use crate::fetch::Fetcher;
use crate::persist::ArtifactStore;
use crate::settings::HarvestMode;
use crate::{Failure, FetchTarget, PageOutcome, PageReport, ResourceReport};

/// Everything one worker needs to take a seed page through to its artifacts.
pub(crate) struct PagePipeline<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub store: &'a ArtifactStore,
    pub libraries: &'a LibraryFilter,
    pub mode: HarvestMode,
}

impl PagePipeline<'_> {
    pub async fn run(&self, page_url: &str) -> PageReport {
        let result = self.harvest(page_url).await;
        PageReport {
            url: page_url.to_string(),
            result,
        }
    }

    async fn harvest(&self, page_url: &str) -> Result<PageOutcome, Failure> {
        engine_debug!("Fetching page {}", page_url);
        let page = match self.fetcher.fetch(page_url, FetchTarget::Page).await {
            Ok(page) => page,
            Err(err) => {
                let failure = Failure::fetch(err);
                engine_info!("[FAILED] {} - {}", page_url, failure);
                return Err(failure);
            }
        };
        if !page.is_success() {
            let failure = Failure::status(page.status);
            engine_info!("[FAILED] {} - {}", page_url, failure);
            return Err(failure);
        }

        let mut outcome = PageOutcome {
            status: page.status,
            ..PageOutcome::default()
        };

        if self.mode.persists_pages() {
            engine_info!("Downloading webpage at {}...", page_url);
            let written = self.write(&page.bytes, &Provenance::page(page_url), ArtifactKind::Page);
            log_written(page_url, &written);
            outcome.page_artifact = Some(written);
        }

        let references = ScriptResourceExtractor.extract_bytes(
            &page.bytes,
            page.metadata.content_type.as_deref(),
            page_url,
        );
        if references.is_empty() {
            engine_info!("No JS files in {}", page_url);
            return Ok(outcome);
        }
        engine_info!("Found {} JS files at {}", references.len(), page_url);

        for resource_url in references {
            if self.libraries.is_common(&resource_url) {
                engine_debug!("Skipping common library {}", resource_url);
                outcome.skipped_common.push(resource_url);
                continue;
            }
            let result = self.harvest_resource(page_url, &resource_url).await;
            log_written(&resource_url, &result);
            outcome.resources.push(ResourceReport {
                url: resource_url,
                result,
            });
        }

        Ok(outcome)
    }

    async fn harvest_resource(
        &self,
        page_url: &str,
        resource_url: &str,
    ) -> Result<PathBuf, Failure> {
        let resource = self
            .fetcher
            .fetch(resource_url, FetchTarget::Resource)
            .await
            .map_err(Failure::fetch)?;
        if !resource.is_success() {
            return Err(Failure::status(resource.status));
        }

        let provenance = match self.mode {
            HarvestMode::ScriptsOnly => Provenance::script(resource_url),
            HarvestMode::FullPage => Provenance::script_on_page(page_url, resource_url),
        };
        self.write(&resource.bytes, &provenance, ArtifactKind::Script)
    }

    fn write(
        &self,
        content: &[u8],
        provenance: &Provenance,
        kind: ArtifactKind,
    ) -> Result<PathBuf, Failure> {
        self.store.persist(content, provenance, kind).map_err(|err| {
            engine_warn!(
                "Failed to write {} artifact into {:?}: {}",
                kind.extension(),
                self.store.dir(),
                err
            );
            Failure::persist(&err)
        })
    }
}

fn log_written(url: &str, result: &Result<PathBuf, Failure>) {
    match result {
        Ok(path) => engine_info!("[OK] {} -> {:?}", url, path),
        Err(failure) => engine_info!("[FAILED] {} - {}", url, failure),
    }
}
