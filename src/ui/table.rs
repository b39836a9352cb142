use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Table")]
    pub metric: String,
    #[tabled(rename = "Rows")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &crate::TrackingStats) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats.rows() {
        builder.add_row(label, &value.to_string());
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_renders_nothing() {
        assert!(TableBuilder::new().build().is_empty());
    }

    #[test]
    fn test_stats_table_lists_every_table() {
        let stats = crate::TrackingStats {
            handled_files: 3,
            imported_files: 2,
            ..Default::default()
        };
        let rendered = stats_table(&stats);
        assert!(rendered.contains("Handled files"));
        assert!(rendered.contains("Dependencies"));
        assert!(rendered.contains('3'));
    }
}
