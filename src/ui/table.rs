use tabled::{settings::Style, Table, Tabled};

/// Widest the entries column gets before it is cut
const MAX_ENTRIES_WIDTH: usize = 60;

#[derive(Tabled)]
pub struct SectionRow {
    #[tabled(rename = "Section")]
    pub section: String,
    #[tabled(rename = "Items")]
    pub items: usize,
    #[tabled(rename = "Entries")]
    pub entries: String,
}

/// One row per portfolio list
pub struct SectionTable {
    rows: Vec<SectionRow>,
}

impl SectionTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, section: &str, labels: &[String]) {
        self.rows.push(SectionRow {
            section: section.to_string(),
            items: labels.len(),
            entries: truncate(&labels.join(", "), MAX_ENTRIES_WIDTH),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for SectionTable {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_table_lists_entries() {
        let mut table = SectionTable::new();
        table.add_row("Habilidades", &["Rust".to_string(), "Go".to_string()]);
        table.add_row("Proyectos", &[]);
        let out = table.build();
        assert!(out.contains("Section"));
        assert!(out.contains("Rust, Go"));
        assert!(out.contains("Proyectos"));
    }

    #[test]
    fn test_long_entries_are_cut() {
        let long = "x".repeat(100);
        let cut = truncate(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_empty_table() {
        assert!(SectionTable::new().build().is_empty());
    }
}
