//! `storeman search` command - find items by name substring

use miette::Result;

use crate::cli::commands::item::output_items;
use crate::cli::helpers::{open_catalog, resolve_format};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Substring to match against item names, case-insensitively.
    /// An empty (or omitted) query matches every item.
    #[arg(default_value = "")]
    pub query: String,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let (_store, catalog, config) = open_catalog(global)?;
    let rows = catalog.search(&args.query);

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }

    output_items(&rows, global, resolve_format(global, &config))
}
