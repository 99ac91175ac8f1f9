use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use harvester_core::{Claim, Frontier};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime};

use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::persist::{ArtifactStore, PersistError};
use crate::pipeline::PagePipeline;
use crate::settings::HarvestSettings;
use crate::{Failure, FailureKind, PageReport, RunReport, Stage};

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("output directory unusable: {0}")]
    OutputDir(#[source] PersistError),
    #[error("failed to spawn any worker thread: {0}")]
    Spawn(#[source] io::Error),
}

type Seed = (usize, String);

/// Runs seed pages through a fixed pool of worker threads.
///
/// Workers are OS threads pulling from a shared [`Frontier`]; network I/O is
/// driven on a runtime owned by the harvester. Every seed ends up with exactly
/// one [`PageReport`], whatever happened to it.
pub struct Harvester {
    settings: HarvestSettings,
    fetcher: Arc<dyn Fetcher>,
    runtime: Runtime,
}

impl Harvester {
    pub fn new(settings: HarvestSettings) -> Result<Self, HarvestError> {
        let fetcher = ReqwestFetcher::new(settings.fetch.clone())
            .map_err(|err| HarvestError::Client(err.to_string()))?;
        Self::with_fetcher(settings, Arc::new(fetcher))
    }

    pub fn with_fetcher(
        settings: HarvestSettings,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, HarvestError> {
        let runtime = Runtime::new().map_err(HarvestError::Runtime)?;
        Ok(Self {
            settings,
            fetcher,
            runtime,
        })
    }

    pub fn settings(&self) -> &HarvestSettings {
        &self.settings
    }

    /// Harvests every seed and blocks until all of them are done.
    ///
    /// With no seeds this returns at once, without touching the output
    /// directory or starting workers.
    pub fn run<I>(&self, seeds: I) -> Result<RunReport, HarvestError>
    where
        I: IntoIterator<Item = String>,
    {
        let frontier: Frontier<Seed> = seeds.into_iter().enumerate().collect();
        let seed_count = frontier.pending_len();
        if seed_count == 0 {
            engine_info!("No seed URLs, nothing to harvest");
            return Ok(RunReport::default());
        }

        let store = ArtifactStore::open(
            &self.settings.output_dir,
            self.settings.mode.token_alphabet(),
        )
        .map_err(HarvestError::OutputDir)?;
        let pipeline = PagePipeline {
            fetcher: self.fetcher.as_ref(),
            store: &store,
            libraries: &self.settings.libraries,
            mode: self.settings.mode,
        };

        let workers = self.settings.workers.clamp(1, seed_count);
        engine_info!(
            "Harvesting {} seed(s) with {} worker(s) into {:?}",
            seed_count,
            workers,
            self.settings.output_dir
        );

        let reports = Mutex::new(Vec::with_capacity(seed_count));
        thread::scope(|scope| {
            let mut started = 0;
            let mut last_err = None;
            for worker_id in 0..workers {
                let handle = self.runtime.handle().clone();
                let (frontier, pipeline, reports) = (&frontier, &pipeline, &reports);
                let spawned = thread::Builder::new()
                    .name(format!("harvest-worker-{worker_id}"))
                    .spawn_scoped(scope, move || {
                        worker_loop(worker_id, frontier, pipeline, &handle, reports)
                    });
                match spawned {
                    Ok(_) => started += 1,
                    Err(err) => {
                        engine_warn!("Could not start worker {}: {}", worker_id, err);
                        last_err = Some(err);
                    }
                }
            }
            if started == 0 {
                return Err(HarvestError::Spawn(
                    last_err.unwrap_or_else(|| io::Error::other("no workers")),
                ));
            }
            frontier.wait_drained();
            Ok(())
        })?;

        let mut reports = reports.into_inner().unwrap_or_else(PoisonError::into_inner);
        reports.sort_by_key(|(index, _)| *index);
        let report = RunReport {
            pages: reports.into_iter().map(|(_, report)| report).collect(),
        };

        engine_info!(
            "Harvest finished: {} page(s) ok, {} failed, {} artifact(s) written, {} common resource(s) skipped",
            report.pages_ok(),
            report.pages_failed(),
            report.artifacts_written(),
            report.resources_skipped()
        );
        Ok(report)
    }
}

fn worker_loop(
    worker_id: usize,
    frontier: &Frontier<Seed>,
    pipeline: &PagePipeline<'_>,
    handle: &Handle,
    reports: &Mutex<Vec<(usize, PageReport)>>,
) {
    engine_debug!("Worker {} started", worker_id);
    while let Some(claim) = frontier.claim() {
        let report = process_seed(&claim, pipeline, handle);
        reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((claim.0, report));
    }
    engine_debug!("Worker {} finished", worker_id);
}

fn process_seed(
    claim: &Claim<'_, Seed>,
    pipeline: &PagePipeline<'_>,
    handle: &Handle,
) -> PageReport {
    let (_, url) = claim.item();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handle.block_on(pipeline.run(url))));
    outcome.unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        engine_error!("Processing {} panicked: {}", url, message);
        PageReport {
            url: url.clone(),
            result: Err(Failure::new(Stage::Processing, FailureKind::Panicked, message)),
        }
    })
}
