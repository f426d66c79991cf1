//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use sasb_domain::traits::AnnotationRepository;
use sasb_export::MetricSummary;
use sasb_store::AnnotationStore;
use std::path::Path;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, project: &Path, formatter: &Formatter) -> Result<()> {
    let store = AnnotationStore::open(project)?;

    let output = match args.metric {
        Some(metric) => formatter.format_annotations(&store.load(&metric)?)?,
        None => formatter.format_summaries(&summaries(&store)?)?,
    };
    println!("{}", output);
    Ok(())
}

/// Summaries of every stored metric, in file name order.
pub fn summaries(store: &AnnotationStore) -> Result<Vec<MetricSummary>> {
    Ok(store
        .records()?
        .iter()
        .map(MetricSummary::from_record)
        .collect())
}
