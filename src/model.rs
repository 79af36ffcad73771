use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSource {
    pub filename: String,
    pub sha256: String,
    pub byte_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditPaths {
    pub output_dir: String,
    pub report_path: String,
    pub results_path: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditCounts {
    pub total_sections: usize,
    pub chapter_sections: usize,
    pub annex_sections: usize,
    pub clause_sections: usize,
    pub unique_section_keys: usize,
    pub chapters_with_clauses: usize,
    pub total_references: usize,
    pub broken_references: usize,
    pub findings_total: usize,
    pub sections_with_findings: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub completed_at: String,
    pub command: String,
    pub contract: ContractSource,
    pub paths: AuditPaths,
    pub counts: AuditCounts,
    pub warnings: Vec<String>,
}
