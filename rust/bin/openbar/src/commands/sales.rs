//! Sales ledger commands: log a pour, browse the ledger.

use std::path::Path;

use anyhow::Result;

use super::{list_params, open_service};

pub fn make(name: &str, quantity: u32, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let sale = svc.make_drink(name, quantity)?;
    println!(
        "{}x {} logged at {:.2} each.",
        sale.quantity, sale.name, sale.sell_price
    );
    Ok(())
}

pub fn list(
    recent: bool,
    search: Option<&str>,
    limit: Option<usize>,
    offset: Option<usize>,
    json_output: bool,
    client_config_path: &Path,
) -> Result<()> {
    let svc = open_service(client_config_path)?;

    if recent {
        let makes = svc.recently_made();
        if json_output {
            println!("{}", serde_json::to_string_pretty(makes)?);
            return Ok(());
        }
        if makes.is_empty() {
            println!("Nothing made yet tonight.");
            return Ok(());
        }
        println!("{:28} {:8} {:>4}", "NAME", "TIME", "QTY");
        for m in makes {
            println!("{:28} {:8} {:>4}", m.name, m.time, m.quantity);
        }
        return Ok(());
    }

    let result = svc.list_sales(&list_params(search, None, limit, offset));
    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if result.items.is_empty() {
        println!("No sales on the ledger.");
        return Ok(());
    }
    println!(
        "{:20} {:28} {:>4} {:>8} {:>8}",
        "TIME", "NAME", "QTY", "PRICE", "TOTAL"
    );
    for sale in &result.items {
        println!(
            "{:20} {:28} {:>4} {:>8.2} {:>8.2}",
            sale.timestamp,
            sale.name,
            sale.quantity,
            sale.sell_price,
            sale.sell_price * f64::from(sale.quantity)
        );
    }
    println!("{} of {} shown.", result.items.len(), result.total);
    Ok(())
}
