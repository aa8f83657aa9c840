use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::importer::{Dispatcher, ImporterKind};

fn formats_table(kinds: &[ImporterKind]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Key", "Format", "Source"]);
    for (i, kind) in kinds.iter().enumerate() {
        let source = if *kind == ImporterKind::Suica { "PDF" } else { "CSV" };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(kind.key()),
            Cell::new(kind.name()),
            Cell::new(source),
        ]);
    }
    table
}

/// Print the recognizers in the order they are tried.
pub fn run() -> Result<()> {
    println!("{}", formats_table(Dispatcher::default().registry()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::ALL_IMPORTERS;

    #[test]
    fn test_formats_table_lists_every_key() {
        let rendered = formats_table(ALL_IMPORTERS).to_string();
        for kind in ALL_IMPORTERS {
            assert!(rendered.contains(kind.key()), "{}", kind.key());
        }
        assert!(rendered.contains("PDF"));
    }
}
