//! `certitrust list` — List credential ids and holders in store order.

use clap::Args;
use serde::Serialize;

use crate::context::Context;
use crate::render;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only credentials held by this wallet address.
    #[arg(long)]
    pub holder: Option<String>,
}

#[derive(Serialize)]
struct Row {
    id: u64,
    holder_address: String,
    sensitive: bool,
}

pub fn run(args: &ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let credentials = match &args.holder {
        Some(holder) => ctx
            .store
            .find_all_by_address(&certitrust_core::HolderAddress::new(holder.trim())),
        None => ctx.store.list(),
    };
    let rows: Vec<Row> = credentials
        .iter()
        .map(|c| Row {
            id: c.id.value(),
            holder_address: c.holder_address.to_string(),
            sensitive: c.sensitive,
        })
        .collect();

    if ctx.json {
        print!("{}", render::json(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No credentials.");
    }
    for row in &rows {
        let marker = if row.sensitive { " (sensitive)" } else { "" };
        println!("  {}  {}{}", row.id, row.holder_address, marker);
    }
    Ok(())
}
