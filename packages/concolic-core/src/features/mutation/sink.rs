//! Mutation report side channel
//!
//! Application code only sees the original filter result; live mutations go
//! to a `MutationSink` for the constraint-collection consumer.

use parking_lot::Mutex;

use super::domain::MutationReport;
use crate::errors::Result;
use crate::features::data_access::FilterPredicate;

/// Consumer of mutation reports
pub trait MutationSink: Send + Sync {
    fn record(&self, report: &MutationReport);
}

/// Collecting sink, drained by the driver between requests
#[derive(Debug, Default)]
pub struct MutationLog {
    reports: Mutex<Vec<MutationReport>>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every report recorded so far
    pub fn reports(&self) -> Vec<MutationReport> {
        self.reports.lock().clone()
    }

    /// Take every report recorded so far
    pub fn drain(&self) -> Vec<MutationReport> {
        std::mem::take(&mut *self.reports.lock())
    }

    /// Live predicates across all reports, in record order
    pub fn live_predicates(&self) -> Vec<FilterPredicate> {
        self.reports
            .lock()
            .iter()
            .flat_map(|r| r.live_predicates().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.reports.lock())?)
    }
}

impl MutationSink for MutationLog {
    fn record(&self, report: &MutationReport) {
        self.reports.lock().push(report.clone());
    }
}
