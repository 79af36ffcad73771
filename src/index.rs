use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::segment::{Section, SectionKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSummary {
    pub kind: SectionKind,
    pub number: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct SectionIndexes {
    pub by_section_key: HashMap<String, SectionSummary>,
    pub by_kind_and_number: HashMap<SectionKind, HashMap<String, String>>,
    pub clauses_by_chapter: HashMap<String, HashMap<String, String>>,
    pub total_sections: usize,
}

impl SectionIndexes {
    // A bare number resolves if any kind carries it, regardless of the
    // keyword that mentioned it.
    pub fn resolves(&self, number: &str) -> bool {
        self.by_kind_and_number
            .values()
            .any(|numbers| numbers.contains_key(number))
    }
}

pub fn build_indexes(sections: &[Section]) -> SectionIndexes {
    let mut indexes = SectionIndexes {
        total_sections: sections.len(),
        ..SectionIndexes::default()
    };

    for section in sections {
        // Last write wins on duplicate keys; numbering is never validated.
        indexes.by_section_key.insert(
            section.key(),
            SectionSummary {
                kind: section.kind,
                number: section.number.clone(),
                title: section.title.clone(),
                content: section.content.clone(),
            },
        );

        indexes
            .by_kind_and_number
            .entry(section.kind)
            .or_default()
            .insert(section.number.clone(), section.title.clone());

        if section.kind == SectionKind::Clause {
            if let Some((chapter_number, _)) = section.number.split_once('.') {
                indexes
                    .clauses_by_chapter
                    .entry(chapter_number.to_string())
                    .or_default()
                    .insert(section.number.clone(), section.title.clone());
            }
        }
    }

    indexes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment_sections;

    fn section(kind: SectionKind, number: &str, title: &str, content: &str) -> Section {
        Section {
            kind,
            number: number.to_string(),
            title: title.to_string(),
            start_line: 0,
            content: content.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_empty_indexes() {
        let indexes = build_indexes(&[]);
        assert_eq!(indexes.total_sections, 0);
        assert!(indexes.by_section_key.is_empty());
        assert!(indexes.by_kind_and_number.is_empty());
        assert!(indexes.clauses_by_chapter.is_empty());
    }

    #[test]
    fn total_sections_matches_input_length() {
        let sections = vec![
            section(SectionKind::Chapter, "I", "Uno", ""),
            section(SectionKind::Clause, "1.1", "Objeto", ""),
            section(SectionKind::Annex, "A", "Planos", ""),
        ];
        let indexes = build_indexes(&sections);
        assert_eq!(indexes.total_sections, 3);
        assert_eq!(indexes.by_section_key.len(), 3);
    }

    #[test]
    fn every_section_lands_under_its_key() {
        let sections = vec![
            section(SectionKind::Chapter, "I", "Disposiciones", "cuerpo"),
            section(SectionKind::Clause, "1.1", "Objeto", "detalle"),
        ];
        let indexes = build_indexes(&sections);

        let chapter = &indexes.by_section_key["capitulo_I"];
        assert_eq!(chapter.title, "Disposiciones");
        assert_eq!(chapter.content, "cuerpo");

        let clause = &indexes.by_section_key["clausula_1.1"];
        assert_eq!(clause.kind, SectionKind::Clause);
        assert_eq!(clause.number, "1.1");
    }

    #[test]
    fn duplicate_numbers_keep_the_last_title() {
        let sections = vec![
            section(SectionKind::Chapter, "I", "Primero", "a"),
            section(SectionKind::Chapter, "I", "Segundo", "b"),
        ];
        let indexes = build_indexes(&sections);

        assert_eq!(indexes.total_sections, 2);
        assert_eq!(indexes.by_section_key.len(), 1);
        assert_eq!(indexes.by_section_key["capitulo_I"].title, "Segundo");
        assert_eq!(
            indexes.by_kind_and_number[&SectionKind::Chapter]["I"],
            "Segundo"
        );
    }

    #[test]
    fn clauses_group_under_their_chapter_prefix() {
        let sections = vec![
            section(SectionKind::Clause, "1.1", "Objeto", ""),
            section(SectionKind::Clause, "1.2", "Plazo", ""),
            section(SectionKind::Clause, "2.1", "Pagos", ""),
        ];
        let indexes = build_indexes(&sections);

        assert_eq!(indexes.clauses_by_chapter.len(), 2);
        assert_eq!(indexes.clauses_by_chapter["1"].len(), 2);
        assert_eq!(indexes.clauses_by_chapter["1"]["1.2"], "Plazo");
        assert_eq!(indexes.clauses_by_chapter["2"]["2.1"], "Pagos");
    }

    #[test]
    fn undotted_clause_numbers_skip_the_local_index() {
        let sections = vec![section(SectionKind::Clause, "7", "Suelta", "")];
        let indexes = build_indexes(&sections);

        assert!(indexes.clauses_by_chapter.is_empty());
        assert!(indexes.by_kind_and_number[&SectionKind::Clause].contains_key("7"));
    }

    #[test]
    fn same_number_under_different_kinds_does_not_collide() {
        let sections = vec![
            section(SectionKind::Chapter, "V", "Capítulo cinco", ""),
            section(SectionKind::Annex, "V", "Anexo cinco", ""),
        ];
        let indexes = build_indexes(&sections);

        assert_eq!(indexes.by_section_key.len(), 2);
        assert_eq!(
            indexes.by_kind_and_number[&SectionKind::Chapter]["V"],
            "Capítulo cinco"
        );
        assert_eq!(
            indexes.by_kind_and_number[&SectionKind::Annex]["V"],
            "Anexo cinco"
        );
        assert!(indexes.resolves("V"));
    }

    #[test]
    fn indexes_built_from_segmented_text_resolve_marker_numbers() {
        let text = "Capítulo I Disposiciones\ncuerpo\nCláusula 1.1 Objeto\ncuerpo\n";
        let sections = segment_sections(text).unwrap();
        let indexes = build_indexes(&sections);

        assert!(indexes.resolves("I"));
        assert!(indexes.resolves("1.1"));
        assert!(!indexes.resolves("9.9"));
    }
}
