use comfy_table::{Cell, Table};

use crate::categorizer::RULES;
use crate::error::Result;
use crate::models::Category;

fn rules_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category", "Keywords"]);
    for (i, (category, keywords)) in RULES.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(category),
            Cell::new(keywords.join(", ")),
        ]);
    }
    for category in Category::ALL {
        if !RULES.iter().any(|(c, _)| *c == category) {
            table.add_row(vec![Cell::new("-"), Cell::new(category), Cell::new("(no match)")]);
        }
    }
    table
}

pub fn list() -> Result<()> {
    println!("Rules (first match wins)\n{}", rules_table());
    Ok(())
}
