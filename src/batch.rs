// src/batch.rs
//! Batch processing: normalize + filter a whole input collection, skipping bad items.

use std::panic::{self, AssertUnwindSafe};

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::filter::FilterConfig;
use crate::normalize::normalize;
use crate::record::{CanonicalRecord, RawRecord};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_items_total", "Raw items seen by the batch processor.");
        describe_counter!("news_kept_total", "Items kept after normalization + filtering.");
        describe_counter!("news_malformed_total", "Items skipped because they are not objects.");
        describe_counter!("news_failed_total", "Items whose normalization failed unexpectedly.");
        describe_counter!("news_filtered_total", "Items rejected by the filter predicate.");
    });
}

/// Result of one batch run. `records` keeps input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub records: Vec<CanonicalRecord>,
    pub malformed: usize,
    pub failed: usize,
    pub filtered: usize,
}

/// Normalize and filter `raw_items`, returning surviving records in input order.
pub fn process(raw_items: &[Value], config: &FilterConfig) -> Vec<CanonicalRecord> {
    process_detailed(raw_items, config).records
}

/// Like [`process`], with counts of skipped items.
pub fn process_detailed(raw_items: &[Value], config: &FilterConfig) -> BatchOutcome {
    process_with(raw_items, config, normalize)
}

pub(crate) fn process_with<F>(
    raw_items: &[Value],
    config: &FilterConfig,
    normalizer: F,
) -> BatchOutcome
where
    F: Fn(&RawRecord<'_>) -> CanonicalRecord,
{
    ensure_metrics_described();

    let mut out = BatchOutcome {
        records: Vec::with_capacity(raw_items.len()),
        ..Default::default()
    };

    for (idx, item) in raw_items.iter().enumerate() {
        let Some(raw) = RawRecord::from_value(item) else {
            warn!(index = idx, item = %item, "skipping non-object item");
            out.malformed += 1;
            continue;
        };

        let record = match panic::catch_unwind(AssertUnwindSafe(|| normalizer(&raw))) {
            Ok(r) => r,
            Err(payload) => {
                let cause = panic_message(&*payload);
                error!(index = idx, error = %cause, "failed to normalize item");
                out.failed += 1;
                continue;
            }
        };

        if config.matches(&record) {
            out.records.push(record);
        } else {
            out.filtered += 1;
        }
    }

    counter!("news_items_total").increment(raw_items.len() as u64);
    counter!("news_kept_total").increment(out.records.len() as u64);
    counter!("news_malformed_total").increment(out.malformed as u64);
    counter!("news_failed_total").increment(out.failed as u64);
    counter!("news_filtered_total").increment(out.filtered as u64);

    info!(
        total = raw_items.len(),
        kept = out.records.len(),
        malformed = out.malformed,
        failed = out.failed,
        filtered = out.filtered,
        "batch processed"
    );

    out
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
