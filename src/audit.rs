use std::collections::BTreeMap;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::index::SectionIndexes;
use crate::segment::Section;

pub const BROKEN_REFERENCE: &str = "broken_reference";
pub const SEMANTIC_REVIEW_MIN_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub location: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewFinding {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: Option<Severity>,
}

// Opaque reference-corpus handle, passed through to the reviewer unopened.
pub trait KnowledgeSource {}

pub trait SemanticReviewer {
    fn review(
        &self,
        content: &str,
        section_id: &str,
        knowledge: Option<&dyn KnowledgeSource>,
    ) -> Result<Vec<ReviewFinding>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditResult {
    pub total_references: usize,
    pub broken_references: usize,
    pub total_sections: usize,
    pub findings: Vec<Finding>,
    pub findings_by_section: BTreeMap<String, Vec<Finding>>,
}

fn reference_pattern() -> Result<Regex> {
    Regex::new(
        r"(?i)\b(?:Cap[íi]tulo|Chapter|Cl[áa]usula|Clause|Anexo|Annex|Art[íi]culo|Article)\s+([IVXLCDM]+|\d+(?:\.\d+)*|[A-Z])\b",
    )
    .context("failed to compile reference regex")
}

pub fn audit_sections(
    sections: &[Section],
    indexes: &SectionIndexes,
    reviewer: Option<&dyn SemanticReviewer>,
    knowledge: Option<&dyn KnowledgeSource>,
) -> Result<AuditResult> {
    let reference = reference_pattern()?;

    let mut result = AuditResult {
        total_sections: sections.len(),
        ..AuditResult::default()
    };

    for section in sections {
        let section_key = section.key();
        let mut section_findings = Vec::<Finding>::new();

        for captures in reference.captures_iter(&section.content) {
            let Some(number) = captures.get(1) else {
                continue;
            };
            let number = number.as_str();

            result.total_references += 1;
            if !indexes.resolves(number) {
                result.broken_references += 1;
                section_findings.push(Finding {
                    kind: BROKEN_REFERENCE.to_string(),
                    description: format!("reference target not found: {number}"),
                    location: section_key.clone(),
                    severity: Severity::High,
                });
            }
        }

        if let Some(reviewer) = reviewer {
            if section.content.chars().count() > SEMANTIC_REVIEW_MIN_CHARS {
                match reviewer.review(&section.content, &section_key, knowledge) {
                    Ok(review_findings) => {
                        for finding in review_findings {
                            section_findings.push(Finding {
                                kind: finding.kind,
                                description: finding.description,
                                location: section_key.clone(),
                                severity: finding.severity.unwrap_or(Severity::Medium),
                            });
                        }
                    }
                    Err(error) => {
                        warn!(
                            section = %section_key,
                            error = %error,
                            "semantic review failed, keeping structural findings only"
                        );
                    }
                }
            }
        }

        record_section_findings(&mut result, section_key, section_findings);
    }

    Ok(result)
}

// Groups merge on duplicate keys so the flat list and the grouped map always
// cover the same findings.
fn record_section_findings(result: &mut AuditResult, section_key: String, findings: Vec<Finding>) {
    if findings.is_empty() {
        return;
    }

    result.findings.extend(findings.iter().cloned());
    result
        .findings_by_section
        .entry(section_key)
        .or_default()
        .extend(findings);
}
