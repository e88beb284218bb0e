use comfy_table::Table;

use crate::mapping::{inventory_fields, sales_fields};

pub fn run(sales: bool) -> anyhow::Result<()> {
    let catalog = if sales { sales_fields() } else { inventory_fields() };

    let mut table = Table::new();
    table.set_header(vec!["Key", "Label", "Required", "Description"]);
    for field in catalog {
        table.add_row(vec![
            field.key.as_str(),
            field.label,
            if field.required { "yes" } else { "" },
            field.description,
        ]);
    }
    println!("{table}");
    Ok(())
}
