use crate::audit::{AuditResult, Finding, Severity};

pub fn render_markdown(result: &AuditResult, generated_at: &str) -> String {
    let mut report = String::new();

    report.push_str("# Contract Audit Report\n\n");
    report.push_str(&format!("**Generated:** {generated_at}\n\n---\n\n"));

    report.push_str("## Executive Summary\n\n");
    report.push_str("| Metric | Value |\n|--------|-------|\n");
    report.push_str(&format!(
        "| Sections analyzed | {} |\n",
        result.total_sections
    ));
    report.push_str(&format!(
        "| References found | {} |\n",
        result.total_references
    ));
    report.push_str(&format!(
        "| Broken references | {} |\n",
        result.broken_references
    ));
    report.push_str(&format!("| Total findings | {} |\n\n", result.findings.len()));

    report.push_str("### Reference Accuracy\n");
    if result.total_references > 0 {
        let success =
            (result.total_references - result.broken_references) as f64 * 100.0
                / result.total_references as f64;
        report.push_str(&format!("- Success rate: {success:.2}%\n"));
        report.push_str(&format!("- Error rate: {:.2}%\n", 100.0 - success));
    } else {
        report.push_str("- No references found to analyze\n");
    }
    report.push_str("\n---\n\n");

    if result.findings.is_empty() {
        report.push_str("## No Findings\n\n");
        report.push_str("The contract passes structural cross-reference checks.\n");
    } else {
        report.push_str("## Findings by Severity\n\n");
        push_severity_block(&mut report, "High", Severity::High, &result.findings);
        push_severity_block(&mut report, "Medium", Severity::Medium, &result.findings);
        push_severity_block(&mut report, "Low", Severity::Low, &result.findings);

        report.push_str("## Findings by Section\n\n");
        for (section_key, findings) in &result.findings_by_section {
            report.push_str(&format!("### {section_key}\n\n"));
            report.push_str(&format!("Total findings: **{}**\n\n", findings.len()));
            for (position, finding) in findings.iter().enumerate() {
                report.push_str(&format!(
                    "{}. **{}** - {}\n",
                    position + 1,
                    finding.kind,
                    finding.description
                ));
            }
            report.push('\n');
        }
    }

    report.push_str("---\n\n## Recommendations\n\n");
    let mut next_item = 1;
    if result.broken_references > 0 {
        report.push_str(&format!(
            "{next_item}. **Fix broken references:** {} reference(s) do not point to an existing section. Review and correct every cross-reference.\n\n",
            result.broken_references
        ));
        next_item += 1;
    }
    let high_count = count_by_severity(&result.findings, Severity::High);
    if high_count > 0 {
        report.push_str(&format!(
            "{next_item}. **Address critical findings:** {high_count} high-severity finding(s) require immediate attention.\n\n",
        ));
        next_item += 1;
    }
    report.push_str(&format!(
        "{next_item}. **Legal review:** submit the contract to expert legal review before final signature.\n"
    ));

    report
}

fn push_severity_block(report: &mut String, label: &str, severity: Severity, findings: &[Finding]) {
    let selected = findings
        .iter()
        .filter(|finding| finding.severity == severity)
        .collect::<Vec<&Finding>>();

    report.push_str(&format!(
        "### {label} severity ({} finding(s))\n\n",
        selected.len()
    ));
    for (position, finding) in selected.iter().enumerate() {
        report.push_str(&format!("**{}. {}**\n", position + 1, finding.kind));
        report.push_str(&format!("- Location: {}\n", finding.location));
        report.push_str(&format!("- Description: {}\n\n", finding.description));
    }
}

fn count_by_severity(findings: &[Finding], severity: Severity) -> usize {
    findings
        .iter()
        .filter(|finding| finding.severity == severity)
        .count()
}
