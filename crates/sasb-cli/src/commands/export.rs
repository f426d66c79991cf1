//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;
use sasb_export::{ExportOptions, Exporter};
use std::path::Path;

/// Execute the export command.
pub fn execute_export(args: ExportArgs, project: &Path, formatter: &Formatter) -> Result<()> {
    let exporter = Exporter::open(project)?;
    let summary = exporter.export_all(&export_options(args))?;
    println!("{}", formatter.export_result(&summary));
    Ok(())
}

/// Map command-line arguments to export options; `cid` falls back to the company.
pub fn export_options(args: ExportArgs) -> ExportOptions {
    ExportOptions {
        uid: args.uid,
        cid: args.cid.unwrap_or_else(|| args.company.clone()),
        company: args.company,
        pdf_path: args.pdf,
        year: args.year,
        lang: args.lang,
        sasb_version: args.sasb_version,
    }
}
