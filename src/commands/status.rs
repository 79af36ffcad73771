use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::audit::AuditResult;
use crate::cli::StatusArgs;
use crate::model::AuditRunManifest;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_path = args.output_dir.join("audit_manifest.json");
    let results_path = args.output_dir.join("audit_results.json");

    info!(output_dir = %args.output_dir.display(), "status requested");

    if manifest_path.exists() {
        let raw = fs::read(&manifest_path)
            .with_context(|| format!("failed to read {}", manifest_path.display()))?;
        let manifest: AuditRunManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

        info!(
            run_id = %manifest.run_id,
            status = %manifest.status,
            started_at = %manifest.started_at,
            completed_at = %manifest.completed_at,
            contract = %manifest.contract.filename,
            sha256 = %manifest.contract.sha256,
            total_sections = manifest.counts.total_sections,
            unique_section_keys = manifest.counts.unique_section_keys,
            total_references = manifest.counts.total_references,
            broken_references = manifest.counts.broken_references,
            findings_total = manifest.counts.findings_total,
            warnings = manifest.warnings.len(),
            "loaded audit manifest"
        );
    } else {
        warn!(path = %manifest_path.display(), "audit manifest missing");
    }

    if results_path.exists() {
        let raw = fs::read(&results_path)
            .with_context(|| format!("failed to read {}", results_path.display()))?;
        let result: AuditResult = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", results_path.display()))?;

        info!(
            sections = result.total_sections,
            references = result.total_references,
            broken = result.broken_references,
            findings = result.findings.len(),
            sections_with_findings = result.findings_by_section.len(),
            "loaded audit results"
        );
    } else {
        warn!(path = %results_path.display(), "audit results missing");
    }

    Ok(())
}
