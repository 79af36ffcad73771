use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::audit::AuditResult;
use crate::cli::ReportArgs;
use crate::report::render_markdown;
use crate::util::{now_utc_string, write_text};

pub fn run(args: ReportArgs) -> Result<()> {
    let raw = fs::read(&args.results_path)
        .with_context(|| format!("failed to read {}", args.results_path.display()))?;
    let result: AuditResult = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", args.results_path.display()))?;

    info!(
        results = %args.results_path.display(),
        findings = result.findings.len(),
        "audit results loaded"
    );

    let rendered = render_markdown(&result, &now_utc_string());

    match args.report_path {
        Some(report_path) => {
            write_text(&report_path, &rendered)?;
            info!(report = %report_path.display(), "report written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
