//! Per-phase load reports.

use serde::Serialize;

use crate::error::LineError;

/// What happened to a single dump line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Saved,
    /// Parsed but deliberately not written
    Dropped,
    Skipped(LineError),
}

/// A dump line that was skipped, with the reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the dump file
    pub line: u64,
    pub reason: String,
}

/// What one loader phase did with its dump file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Lines read from the file
    pub read: u64,
    /// Records written to the store
    pub saved: u64,
    /// Works parsed but not written because they list no authors
    pub dropped: u64,
    /// Malformed lines
    pub skipped: u64,
    /// First skipped lines, bounded by `max_samples`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<SkippedLine>,
    #[serde(skip)]
    max_samples: usize,
}

impl LoadReport {
    pub fn new(max_samples: usize) -> Self {
        Self {
            max_samples,
            ..Default::default()
        }
    }

    /// Count a processed line
    pub fn record(&mut self, line: u64, outcome: &LineOutcome) {
        self.read += 1;
        match outcome {
            LineOutcome::Saved => self.saved += 1,
            LineOutcome::Dropped => self.dropped += 1,
            LineOutcome::Skipped(error) => self.record_skip(line, error),
        }
    }

    fn record_skip(&mut self, line: u64, error: &LineError) {
        self.skipped += 1;
        if self.samples.len() < self.max_samples {
            self.samples.push(SkippedLine {
                line,
                reason: error.to_string(),
            });
        }
    }
}

/// Reports of both phases of the initial load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<LoadReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub works: Option<LoadReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_bounded() {
        let mut report = LoadReport::new(2);
        for line in 1..=5 {
            report.record_skip(line, &LineError::NoJsonObject);
        }

        assert_eq!(report.skipped, 5);
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.samples[0].line, 1);
        assert_eq!(report.samples[1].reason, "no JSON object on line");
    }

    #[test]
    fn test_record_outcomes() {
        let mut report = LoadReport::new(10);
        report.record(1, &LineOutcome::Saved);
        report.record(2, &LineOutcome::Dropped);
        report.record(3, &LineOutcome::Skipped(LineError::NoJsonObject));
        report.record(4, &LineOutcome::Saved);

        assert_eq!(report.read, 4);
        assert_eq!(report.saved, 2);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.samples[0].line, 3);
    }

    #[test]
    fn test_zero_samples() {
        let mut report = LoadReport::new(0);
        report.record_skip(7, &LineError::MissingField("key"));
        assert_eq!(report.skipped, 1);
        assert!(report.samples.is_empty());
    }
}
