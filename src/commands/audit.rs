use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::audit::audit_sections;
use crate::cli::AuditArgs;
use crate::index::build_indexes;
use crate::model::{AuditCounts, AuditPaths, AuditRunManifest, ContractSource, MANIFEST_VERSION};
use crate::normalize::normalize_text;
use crate::report::render_markdown;
use crate::segment::{Section, SectionKind, segment_sections};
use crate::util::{
    ensure_directory, now_utc_string, sha256_hex, utc_compact_string, write_json_pretty, write_text,
};

pub fn run(args: AuditArgs) -> Result<()> {
    let started_at = now_utc_string();
    let run_id = format!("audit-{}", utc_compact_string(Utc::now()));

    let raw_bytes = fs::read(&args.contract_path)
        .with_context(|| format!("failed to read contract: {}", args.contract_path.display()))?;
    let contract_sha256 = sha256_hex(&raw_bytes);
    let byte_count = raw_bytes.len();
    let raw = String::from_utf8(raw_bytes).with_context(|| {
        format!(
            "contract is not valid UTF-8 text: {}",
            args.contract_path.display()
        )
    })?;

    info!(
        contract = %args.contract_path.display(),
        bytes = byte_count,
        run_id = %run_id,
        "contract loaded"
    );

    let mut warnings = Vec::<String>::new();

    let normalized = normalize_text(&raw);
    let sections = segment_sections(&normalized)?;
    if sections.is_empty() {
        let message = "no structural markers recognized in contract text".to_string();
        warn!(contract = %args.contract_path.display(), "{message}");
        warnings.push(message);
    }
    info!(sections = sections.len(), "contract segmented");

    let indexes = build_indexes(&sections);
    let result = audit_sections(&sections, &indexes, None, None)?;
    info!(
        total_references = result.total_references,
        broken_references = result.broken_references,
        findings = result.findings.len(),
        "audit completed"
    );

    ensure_directory(&args.output_dir)?;
    let report_path = resolve_path(args.report_path, &args.output_dir, "audit_report.md");
    let results_path = resolve_path(args.results_path, &args.output_dir, "audit_results.json");
    let manifest_path = resolve_path(args.manifest_path, &args.output_dir, "audit_manifest.json");

    write_json_pretty(&results_path, &result)?;
    write_text(&report_path, &render_markdown(&result, &started_at))?;

    let manifest = AuditRunManifest {
        manifest_version: MANIFEST_VERSION,
        run_id,
        status: "completed".to_string(),
        started_at,
        completed_at: now_utc_string(),
        command: format!(
            "contraudit audit --contract-path {}",
            args.contract_path.display()
        ),
        contract: ContractSource {
            filename: args
                .contract_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            sha256: contract_sha256,
            byte_count,
        },
        paths: AuditPaths {
            output_dir: args.output_dir.display().to_string(),
            report_path: report_path.display().to_string(),
            results_path: results_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        counts: AuditCounts {
            total_sections: result.total_sections,
            chapter_sections: count_kind(&sections, SectionKind::Chapter),
            annex_sections: count_kind(&sections, SectionKind::Annex),
            clause_sections: count_kind(&sections, SectionKind::Clause),
            unique_section_keys: indexes.by_section_key.len(),
            chapters_with_clauses: indexes.clauses_by_chapter.len(),
            total_references: result.total_references,
            broken_references: result.broken_references,
            findings_total: result.findings.len(),
            sections_with_findings: result.findings_by_section.len(),
        },
        warnings,
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(
        report = %report_path.display(),
        results = %results_path.display(),
        manifest = %manifest_path.display(),
        "audit artifacts written"
    );

    Ok(())
}

fn resolve_path(explicit: Option<PathBuf>, output_dir: &std::path::Path, name: &str) -> PathBuf {
    explicit.unwrap_or_else(|| output_dir.join(name))
}

fn count_kind(sections: &[Section], kind: SectionKind) -> usize {
    sections.iter().filter(|s| s.kind == kind).count()
}
