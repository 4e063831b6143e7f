//! `storeman item` command - item management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{find_item, find_place, open_catalog, resolve_format};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::{EditOutcome, ItemRow};
use crate::core::identity::RecordId;
use crate::entities::Item;

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items, optionally filtered by place
    List(ListArgs),

    /// Create a new item
    New(NewArgs),

    /// Show an item's details
    Show(ShowArgs),

    /// Edit an item's fields
    Edit(EditArgs),

    /// Remove an item
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only items kept in this place (ID or unique id prefix)
    #[arg(long, short = 'p')]
    pub place: Option<String>,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Item name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Free-text details
    #[arg(long)]
    pub details: Option<String>,

    /// Piece count
    #[arg(long, short = 'a', default_value_t = 1)]
    pub amount: i64,

    /// Place to keep the item in (ID or unique id prefix)
    #[arg(long, short = 'p')]
    pub place: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Item ID or unique id prefix
    pub id: String,

    /// Re-resolve the place against the places table (fails hard if the
    /// referenced place row is gone)
    #[arg(long)]
    pub resolve: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Item ID or unique id prefix
    pub id: String,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New details
    #[arg(long)]
    pub details: Option<String>,

    /// New piece count; a non-integer value is dropped, not an error
    #[arg(long, short = 'a')]
    pub amount: Option<String>,

    /// Move to this place; pass 'none' to unassign
    #[arg(long, short = 'p')]
    pub place: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Item ID or unique id prefix
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 16),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("place", "PLACE", 24),
    ColumnDef::new("details", "DETAILS", 36),
    ColumnDef::new("amount", "AMOUNT", 8),
];

/// Run an item subcommand
pub fn run(cmd: ItemCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ItemCommands::List(args) => run_list(args, global),
        ItemCommands::New(args) => run_new(args, global),
        ItemCommands::Show(args) => run_show(args, global),
        ItemCommands::Edit(args) => run_edit(args, global),
        ItemCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_store, catalog, config) = open_catalog(global)?;

    let selected: Option<RecordId> = match &args.place {
        None => None,
        Some(selector) => Some(
            find_place(&catalog, selector)?
                .ok_or_else(|| miette::miette!("no place matches '{}'", selector))?
                .id
                .clone(),
        ),
    };
    let rows = catalog.items_in_place(selected.as_ref());

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }

    output_items(&rows, global, resolve_format(global, &config))
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let (store, mut catalog, _config) = open_catalog(global)?;

    let place_id = match &args.place {
        None => None,
        Some(selector) => Some(
            find_place(&catalog, selector)?
                .ok_or_else(|| miette::miette!("no place matches '{}'", selector))?
                .id
                .clone(),
        ),
    };

    let defaults = Item::placeholder();
    let item = Item::new(
        args.name.unwrap_or(defaults.name),
        args.details.unwrap_or(defaults.details),
        args.amount,
        place_id,
    );
    let id = item.id.clone();
    catalog.add_item(&store, item)?;

    if global.quiet {
        println!("{}", id);
    } else {
        println!("{} Created item {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (store, catalog, config) = open_catalog(global)?;
    let id = find_item(&catalog, &args.id)?
        .ok_or_else(|| miette::miette!("no item matches '{}'", args.id))?
        .id
        .clone();
    let row = catalog
        .item(&id)
        .ok_or_else(|| miette::miette!("no item matches '{}'", args.id))?;

    if args.resolve {
        let place = catalog.resolve_place(&store, &id)?;
        if !global.quiet {
            println!("{} Place: {}", style("✓").green(), place);
        }
    }

    if resolve_format(global, &config) == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(row).into_diagnostic()?);
        return Ok(());
    }

    println!("{}  {}", style("ID:").bold(), row.item.id);
    println!("{}  {}", style("Name:").bold(), row.item.name);
    println!("{}  {}", style("Place:").bold(), row.place_name);
    println!("{}  {}", style("Details:").bold(), row.item.details);
    println!("{}  {}", style("Amount:").bold(), row.item.amount);
    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let (store, mut catalog, _config) = open_catalog(global)?;
    let id = find_item(&catalog, &args.id)?
        .ok_or_else(|| miette::miette!("no item matches '{}'", args.id))?
        .id
        .clone();

    if let Some(name) = &args.name {
        catalog.rename_item(&store, &id, name)?;
    }
    if let Some(details) = &args.details {
        catalog.set_item_details(&store, &id, details)?;
    }
    if let Some(amount) = &args.amount {
        let outcome = catalog.set_item_amount_text(&store, &id, amount)?;
        if outcome == EditOutcome::Ignored && !global.quiet {
            eprintln!(
                "{}",
                style(format!("ignoring non-integer amount '{}'", amount)).dim()
            );
        }
    }
    if let Some(selector) = &args.place {
        let place_id = if selector.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(
                find_place(&catalog, selector)?
                    .ok_or_else(|| miette::miette!("no place matches '{}'", selector))?
                    .id
                    .clone(),
            )
        };
        catalog.assign_item_place(&store, &id, place_id)?;
    }

    if !global.quiet {
        println!("{} Updated item {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let (store, mut catalog, _config) = open_catalog(global)?;

    // A selector matching nothing is silently ignored, like deleting with
    // an empty selection.
    let Some(item) = find_item(&catalog, &args.id)? else {
        return Ok(());
    };
    let id = item.id.clone();

    if !args.yes {
        let prompt = format!("Remove item '{}'?", item.name);
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    catalog.remove_item(&store, &id)?;
    if !global.quiet {
        println!("{} Removed item {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

/// Render item rows in the selected format; shared with `storeman search`
pub fn output_items(rows: &[&ItemRow], global: &GlobalOpts, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(rows).into_diagnostic()?
        );
        return Ok(());
    }

    let table_rows: Vec<TableRow> = rows.iter().map(|r| item_row(r)).collect();
    let formatter = if global.quiet {
        TableFormatter::new(COLUMNS, "item").without_summary()
    } else {
        TableFormatter::new(COLUMNS, "item")
    };
    formatter.output(table_rows, format);
    Ok(())
}

fn item_row(row: &ItemRow) -> TableRow {
    TableRow::new(row.item.id.to_string())
        .cell("id", CellValue::Id(row.item.id.to_string()))
        .cell("name", CellValue::Text(row.item.name.clone()))
        .cell("place", CellValue::Text(row.place_name.clone()))
        .cell("details", CellValue::Text(row.item.details.clone()))
        .cell("amount", CellValue::Number(row.item.amount))
}
