// Section classifier for the styrenics overview sheet.
use crate::groups::GroupDef;
use crate::utils::extract_brand_name;

/// Every section header in the sheet starts with this sentinel prefix.
pub const GROUP_HEADER_PREFIX: &str = "Styrenics /";

/// First cell of the column-label row that follows each section header.
pub const PRODUCT_NAME_LABEL: &str = "product name";

/// Classifier state. The label row is only skippable on the row immediately
/// following a section header; anywhere else it is ordinary data.
#[derive(Clone, Copy)]
enum State {
    Idle,
    ExpectHeaderLabel(usize),
    InSection(usize),
}

/// What a single row turned out to be.
pub enum RowClass<'a> {
    /// A recognized group header; the section's group and brand are resolved.
    SectionStart {
        group: &'a GroupDef,
        brand_name: String,
    },
    /// The column-label row right after a header. Skipped.
    HeaderLabel,
    /// A product row belonging to the active section.
    Data { group: &'a GroupDef, name: String },
    /// Blank row, unknown header, or a row outside any section.
    Ignored,
}

pub struct Classifier<'a> {
    groups: &'a [GroupDef],
    state: State,
}

impl<'a> Classifier<'a> {
    pub fn new(groups: &'a [GroupDef]) -> Self {
        Self {
            groups,
            state: State::Idle,
        }
    }

    /// Classifies the next row and advances the section state. Single pass,
    /// strictly sequential; no lookahead beyond the header-label expectation.
    pub fn classify(&mut self, row: &[String]) -> RowClass<'a> {
        let first = row.first().map(|c| c.trim()).unwrap_or("");

        // Blank first cell: ignored entirely, section state untouched.
        if first.is_empty() {
            return RowClass::Ignored;
        }

        if first.starts_with(GROUP_HEADER_PREFIX) {
            if let Some(idx) = self.groups.iter().position(|g| g.pattern.is_match(first)) {
                self.state = State::ExpectHeaderLabel(idx);
                return RowClass::SectionStart {
                    group: &self.groups[idx],
                    brand_name: extract_brand_name(first),
                };
            }
            // Header-shaped but unknown: skip without changing sections.
            return RowClass::Ignored;
        }

        match self.state {
            State::Idle => RowClass::Ignored,
            State::ExpectHeaderLabel(idx) => {
                self.state = State::InSection(idx);
                if first.to_lowercase().starts_with(PRODUCT_NAME_LABEL) {
                    RowClass::HeaderLabel
                } else {
                    // No label row after this header; the row is already data.
                    RowClass::Data {
                        group: &self.groups[idx],
                        name: first.to_string(),
                    }
                }
            }
            State::InSection(idx) => RowClass::Data {
                group: &self.groups[idx],
                name: first.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::group_definitions;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_resolves_category_and_brand() {
        let groups = group_definitions();
        let mut classifier = Classifier::new(&groups);
        match classifier.classify(&row(&["Styrenics / ABS / Sinkral®"])) {
            RowClass::SectionStart { group, brand_name } => {
                assert_eq!(group.category_slug, "abs");
                assert_eq!(group.category_name, "ABS");
                assert_eq!(brand_name, "Sinkral");
            }
            _ => panic!("expected a section start"),
        }
    }

    #[test]
    fn test_label_row_skipped_exactly_once() {
        let groups = group_definitions();
        let mut classifier = Classifier::new(&groups);
        classifier.classify(&row(&["Styrenics / ABS / Sinkral®"]));

        assert!(matches!(
            classifier.classify(&row(&["Product name", "Vicat", "Izod"])),
            RowClass::HeaderLabel
        ));
        // a second label-looking row mid-section is ordinary data
        match classifier.classify(&row(&["Product name", "98"])) {
            RowClass::Data { name, .. } => assert_eq!(name, "Product name"),
            _ => panic!("expected data"),
        }
    }

    #[test]
    fn test_header_without_label_row_goes_straight_to_data() {
        let groups = group_definitions();
        let mut classifier = Classifier::new(&groups);
        classifier.classify(&row(&["Styrenics / SAN / Kostil®"]));
        match classifier.classify(&row(&["Kostil B 255", "Extrusion"])) {
            RowClass::Data { group, name } => {
                assert_eq!(group.category_slug, "san");
                assert_eq!(name, "Kostil B 255");
            }
            _ => panic!("expected data"),
        }
    }

    #[test]
    fn test_blank_row_does_not_consume_the_label_expectation() {
        let groups = group_definitions();
        let mut classifier = Classifier::new(&groups);
        classifier.classify(&row(&["Styrenics / ABS / Sinkral®"]));
        assert!(matches!(classifier.classify(&row(&["", "stray"])), RowClass::Ignored));
        assert!(matches!(
            classifier.classify(&row(&["Product name"])),
            RowClass::HeaderLabel
        ));
    }

    #[test]
    fn test_unknown_header_keeps_previous_section() {
        let groups = group_definitions();
        let mut classifier = Classifier::new(&groups);
        classifier.classify(&row(&["Styrenics / ABS / Sinkral®"]));
        classifier.classify(&row(&["Product name"]));

        // header prefix but no matching group: silently ignored
        assert!(matches!(
            classifier.classify(&row(&["Styrenics / PPE / Noryl®"])),
            RowClass::Ignored
        ));
        // following rows still belong to the ABS section
        match classifier.classify(&row(&["Sinkral F-320"])) {
            RowClass::Data { group, .. } => assert_eq!(group.category_slug, "abs"),
            _ => panic!("expected data"),
        }
    }

    #[test]
    fn test_rows_before_any_section_are_ignored() {
        let groups = group_definitions();
        let mut classifier = Classifier::new(&groups);
        assert!(matches!(
            classifier.classify(&row(&["Complete Styrenics Products Overview"])),
            RowClass::Ignored
        ));
        assert!(matches!(
            classifier.classify(&row(&["Product name", "Vicat"])),
            RowClass::Ignored
        ));
    }
}
