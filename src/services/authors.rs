//! Author dump loader

use std::path::Path;

use crate::{
    dump::{json_object, translate_author, DumpReader},
    error::AppResult,
    models::{LineOutcome, LoadReport},
    repository::AuthorStoreArc,
};

#[derive(Clone)]
pub struct AuthorLoader {
    store: AuthorStoreArc,
    max_skip_samples: usize,
}

impl AuthorLoader {
    pub fn new(store: AuthorStoreArc, max_skip_samples: usize) -> Self {
        Self {
            store,
            max_skip_samples,
        }
    }

    /// Load every line of the author dump at `path`.
    ///
    /// Malformed lines are skipped and counted. Failing to read the file or
    /// to write to the store ends the run with an error.
    pub async fn load(&self, path: &Path) -> AppResult<LoadReport> {
        let mut reader = DumpReader::open(path).await?;
        let mut report = LoadReport::new(self.max_skip_samples);

        tracing::info!("Loading authors from {}", path.display());

        while let Some((line_no, line)) = reader.next_line().await? {
            let outcome = match line {
                Ok(line) => self.process_line(&line).await?,
                Err(e) => LineOutcome::Skipped(e),
            };
            if let LineOutcome::Skipped(ref e) = outcome {
                tracing::warn!(line = line_no, "Skipping author line: {}", e);
            }
            report.record(line_no, &outcome);
        }

        tracing::info!(
            read = report.read,
            saved = report.saved,
            skipped = report.skipped,
            "Author load finished"
        );

        Ok(report)
    }

    async fn process_line(&self, line: &str) -> AppResult<LineOutcome> {
        let author = match json_object(line).and_then(|object| translate_author(&object)) {
            Ok(author) => author,
            Err(e) => return Ok(LineOutcome::Skipped(e)),
        };

        tracing::debug!("Saving author {}...", author.name);
        self.store.save(&author).await?;
        Ok(LineOutcome::Saved)
    }
}
