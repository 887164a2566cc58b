//! Work dump loader

use std::path::Path;

use crate::{
    dump::{json_object, translate_work, DumpReader},
    error::AppResult,
    models::{book::UNKNOWN_AUTHOR, LineOutcome, LoadReport},
    repository::{AuthorStoreArc, BookStoreArc},
};

#[derive(Clone)]
pub struct WorkLoader {
    authors: AuthorStoreArc,
    books: BookStoreArc,
    max_skip_samples: usize,
}

impl WorkLoader {
    pub fn new(authors: AuthorStoreArc, books: BookStoreArc, max_skip_samples: usize) -> Self {
        Self {
            authors,
            books,
            max_skip_samples,
        }
    }

    /// Load every line of the works dump at `path`.
    ///
    /// Author names are resolved against the author store as each work is
    /// read, so the author dump has to be loaded first. Works without an
    /// `authors` array are never written.
    pub async fn load(&self, path: &Path) -> AppResult<LoadReport> {
        let mut reader = DumpReader::open(path).await?;
        let mut report = LoadReport::new(self.max_skip_samples);

        tracing::info!("Loading works from {}", path.display());

        while let Some((line_no, line)) = reader.next_line().await? {
            let outcome = match line {
                Ok(line) => self.process_line(&line).await?,
                Err(e) => LineOutcome::Skipped(e),
            };
            match outcome {
                LineOutcome::Skipped(ref e) => {
                    tracing::warn!(line = line_no, "Skipping work line: {}", e)
                }
                LineOutcome::Dropped => {
                    tracing::debug!(line = line_no, "Dropping work without authors")
                }
                LineOutcome::Saved => {}
            }
            report.record(line_no, &outcome);
        }

        tracing::info!(
            read = report.read,
            saved = report.saved,
            dropped = report.dropped,
            skipped = report.skipped,
            "Work load finished"
        );

        Ok(report)
    }

    async fn process_line(&self, line: &str) -> AppResult<LineOutcome> {
        let mut work = match json_object(line).and_then(|object| translate_work(&object)) {
            Ok(work) => work,
            Err(e) => return Ok(LineOutcome::Skipped(e)),
        };

        let Some(author_ids) = work.author_ids.take() else {
            return Ok(LineOutcome::Dropped);
        };

        let author_names = self.resolve_author_names(&author_ids).await?;
        let book = work.into_book(author_ids, author_names);

        tracing::debug!("Saving book {}...", book.name);
        self.books.save(&book).await?;
        Ok(LineOutcome::Saved)
    }

    /// Names for `ids`, in order, with a placeholder for unknown authors
    pub async fn resolve_author_names(&self, ids: &[String]) -> AppResult<Vec<String>> {
        let mut names = Vec::with_capacity(ids.len());
        for id in ids {
            let name = match self.authors.find_by_id(id).await? {
                Some(author) => author.name,
                None => UNKNOWN_AUTHOR.to_string(),
            };
            names.push(name);
        }
        Ok(names)
    }
}
