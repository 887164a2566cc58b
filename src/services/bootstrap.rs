//! Initial load sequence: authors, then works, once per process.

use crate::{
    config::{DataDumpConfig, LoaderConfig},
    error::{AppError, AppResult},
    models::LoadSummary,
    repository::{AuthorStoreArc, BookStoreArc},
    services::{AuthorLoader, WorkLoader},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    RunAuthors,
    RunWorks,
    Idle,
}

impl LoadPhase {
    fn next(self) -> Self {
        match self {
            LoadPhase::RunAuthors => LoadPhase::RunWorks,
            LoadPhase::RunWorks | LoadPhase::Idle => LoadPhase::Idle,
        }
    }
}

/// Loads the author dump and then the works dump.
///
/// Both phases always run. An I/O failure ends only its own phase and is
/// returned once the sequence is over as `AppError::Incomplete`, carrying the
/// first I/O error and the reports of the phases that finished. A storage
/// failure ends the sequence immediately.
pub struct InitialLoad {
    authors: AuthorLoader,
    works: WorkLoader,
    dumps: DataDumpConfig,
    phase: LoadPhase,
}

impl InitialLoad {
    pub fn new(
        author_store: AuthorStoreArc,
        book_store: BookStoreArc,
        dumps: DataDumpConfig,
        loader: &LoaderConfig,
    ) -> Self {
        Self {
            authors: AuthorLoader::new(author_store.clone(), loader.max_skip_samples),
            works: WorkLoader::new(author_store, book_store, loader.max_skip_samples),
            dumps,
            phase: LoadPhase::RunAuthors,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub async fn run(mut self) -> AppResult<LoadSummary> {
        let mut summary = LoadSummary::default();
        let mut io_failure: Option<AppError> = None;

        tracing::info!("Starting author phase");
        match self.authors.load(&self.dumps.author).await {
            Ok(report) => summary.authors = Some(report),
            Err(e) if e.is_io() => {
                tracing::error!("Author phase aborted: {}", e);
                io_failure = Some(e);
            }
            Err(e) => return Err(e),
        }
        self.advance();

        tracing::info!("Starting work phase");
        match self.works.load(&self.dumps.works).await {
            Ok(report) => summary.works = Some(report),
            Err(e) if e.is_io() => {
                tracing::error!("Work phase aborted: {}", e);
                io_failure.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
        self.advance();

        match io_failure {
            Some(e) => Err(AppError::Incomplete {
                summary: Box::new(summary),
                source: Box::new(e),
            }),
            None => Ok(summary),
        }
    }

    fn advance(&mut self) {
        self.phase = self.phase.next();
        tracing::debug!(phase = ?self.phase, "Load phase changed");
    }
}
