use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "capitulo")]
    Chapter,
    #[serde(rename = "anexo")]
    Annex,
    #[serde(rename = "clausula")]
    Clause,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chapter => "capitulo",
            Self::Annex => "anexo",
            Self::Clause => "clausula",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub number: String,
    pub title: String,
    pub start_line: usize,
    pub content: String,
}

impl Section {
    pub fn key(&self) -> String {
        format!("{}_{}", self.kind.as_str(), self.number)
    }
}

pub struct MarkerPatterns {
    rules: Vec<(SectionKind, Regex)>,
}

impl MarkerPatterns {
    pub fn new() -> Result<Self> {
        // Priority order is fixed: chapter, then annex, then clause.
        let chapter = Regex::new(r"(?i)^[ \t]*(?:Cap[íi]tulo|Chapter)[ \t]+([IVXLCDM]+)[ \t]+(.+)$")
            .context("failed to compile chapter marker regex")?;
        let annex =
            Regex::new(r"(?i)^[ \t]*(?:Anexos?|Annex(?:es)?)[ \t]+([IVXLCDM]+|\d+|[A-Z])[ \t]+(.+)$")
                .context("failed to compile annex marker regex")?;
        let clause =
            Regex::new(r"(?i)^[ \t]*(?:Cl[áa]usula|Clause)[ \t]+(\d+(?:\.\d+)*)[.\s]+(.+)$")
                .context("failed to compile clause marker regex")?;

        Ok(Self {
            rules: vec![
                (SectionKind::Chapter, chapter),
                (SectionKind::Annex, annex),
                (SectionKind::Clause, clause),
            ],
        })
    }

    fn match_line(&self, line: &str) -> Option<(SectionKind, String, String)> {
        for (kind, pattern) in &self.rules {
            if let Some(captures) = pattern.captures(line) {
                let number = captures.get(1)?.as_str().trim().to_string();
                let title = captures.get(2)?.as_str().trim().to_string();
                return Some((*kind, number, title));
            }
        }
        None
    }
}

struct OpenSection {
    kind: SectionKind,
    number: String,
    title: String,
    start_line: usize,
    lines: Vec<String>,
}

impl OpenSection {
    fn finish(self) -> Section {
        Section {
            kind: self.kind,
            number: self.number,
            title: self.title,
            start_line: self.start_line,
            content: self.lines.join("\n"),
        }
    }
}

pub fn segment_sections(normalized: &str) -> Result<Vec<Section>> {
    let patterns = MarkerPatterns::new()?;

    let mut sections = Vec::<Section>::new();
    let mut open: Option<OpenSection> = None;

    for (line_number, line) in normalized.lines().enumerate() {
        if let Some((kind, number, title)) = patterns.match_line(line) {
            if let Some(finished) = open.take() {
                sections.push(finished.finish());
            }
            open = Some(OpenSection {
                kind,
                number,
                title,
                start_line: line_number,
                lines: Vec::new(),
            });
            continue;
        }

        // Content before the first recognized marker is out of scope.
        if let Some(section) = open.as_mut() {
            section.lines.push(line.to_string());
        }
    }

    if let Some(finished) = open.take() {
        sections.push(finished.finish());
    }

    Ok(sections)
}
