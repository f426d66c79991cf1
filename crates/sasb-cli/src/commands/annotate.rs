//! Annotate command implementation.

use crate::cli::AnnotateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sasb_domain::traits::AnnotationRepository;
use sasb_domain::{Annotation, BBox};
use sasb_store::AnnotationStore;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Execute the annotate command.
pub fn execute_annotate(args: AnnotateArgs, project: &Path, formatter: &Formatter) -> Result<()> {
    let metric = args.metric.clone();
    let annotation = build_annotation(args)?;
    let page = annotation.page;

    let store = AnnotationStore::open(project)?;
    store.add_annotation(&metric, annotation)?;

    let count = store.load(&metric)?.annotations.len();
    println!(
        "{}",
        formatter.success(&format!(
            "Recorded annotation for {} on page {} ({} total)",
            metric, page, count
        ))
    );
    Ok(())
}

/// Turn command-line arguments into an annotation stamped with the current time.
pub fn build_annotation(args: AnnotateArgs) -> Result<Annotation> {
    let bboxes = args
        .bboxes
        .iter()
        .map(|s| BBox::parse(s).map_err(CliError::InvalidInput))
        .collect::<Result<Vec<_>>>()?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    Ok(Annotation {
        page: args.page,
        value: args.value,
        unit: args.unit,
        category: args.category.into(),
        complete: args.complete,
        bboxes,
        cat_ok: args.cat_ok,
        unit_ok: args.unit_ok,
        timestamp,
    })
}
