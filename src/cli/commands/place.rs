//! `storeman place` command - storage place management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{find_place, open_catalog, resolve_format};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::StoragePlace;

#[derive(Subcommand, Debug)]
pub enum PlaceCommands {
    /// List places
    List(ListArgs),

    /// Create a new place
    New(NewArgs),

    /// Show a place's details
    Show(ShowArgs),

    /// Edit a place's fields
    Edit(EditArgs),

    /// Remove a place (items kept in it are left in place, orphaned)
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Place name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Where the place itself is
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Kind of place (box, shelf, ...)
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Place ID or unique id prefix
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Place ID or unique id prefix
    pub id: String,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New location
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// New kind
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Place ID or unique id prefix
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 16),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("location", "LOCATION", 30),
    ColumnDef::new("type", "TYPE", 20),
];

/// Run a place subcommand
pub fn run(cmd: PlaceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PlaceCommands::List(args) => run_list(args, global),
        PlaceCommands::New(args) => run_new(args, global),
        PlaceCommands::Show(args) => run_show(args, global),
        PlaceCommands::Edit(args) => run_edit(args, global),
        PlaceCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_store, catalog, config) = open_catalog(global)?;

    if args.count {
        println!("{}", catalog.places().len());
        return Ok(());
    }

    let format = resolve_format(global, &config);
    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(catalog.places()).into_diagnostic()?
        );
        return Ok(());
    }

    let rows: Vec<TableRow> = catalog.places().iter().map(place_row).collect();
    let formatter = if global.quiet {
        TableFormatter::new(COLUMNS, "place").without_summary()
    } else {
        TableFormatter::new(COLUMNS, "place")
    };
    formatter.output(rows, format);
    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let (store, mut catalog, _config) = open_catalog(global)?;

    // Omitted fields fall back to the interactive-creation placeholders.
    let defaults = StoragePlace::placeholder();
    let place = StoragePlace::new(
        args.name.unwrap_or(defaults.name),
        args.location.unwrap_or(defaults.location),
        args.kind.unwrap_or(defaults.kind),
    );
    let id = place.id.clone();
    catalog.add_place(&store, place)?;

    if global.quiet {
        println!("{}", id);
    } else {
        println!("{} Created place {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_store, catalog, config) = open_catalog(global)?;
    let place = find_place(&catalog, &args.id)?
        .ok_or_else(|| miette::miette!("no place matches '{}'", args.id))?;

    if resolve_format(global, &config) == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(place).into_diagnostic()?
        );
        return Ok(());
    }

    println!("{}  {}", style("ID:").bold(), place.id);
    println!("{}  {}", style("Name:").bold(), place.name);
    println!("{}  {}", style("Location:").bold(), place.location);
    println!("{}  {}", style("Type:").bold(), place.kind);
    Ok(())
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let (store, mut catalog, _config) = open_catalog(global)?;
    let id = find_place(&catalog, &args.id)?
        .ok_or_else(|| miette::miette!("no place matches '{}'", args.id))?
        .id
        .clone();

    if let Some(name) = &args.name {
        catalog.rename_place(&store, &id, name)?;
    }
    if let Some(location) = &args.location {
        catalog.set_place_location(&store, &id, location)?;
    }
    if let Some(kind) = &args.kind {
        catalog.set_place_kind(&store, &id, kind)?;
    }

    if !global.quiet {
        println!("{} Updated place {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let (store, mut catalog, _config) = open_catalog(global)?;

    // A selector matching nothing is silently ignored, like deleting with
    // an empty selection.
    let Some(place) = find_place(&catalog, &args.id)? else {
        return Ok(());
    };
    let id = place.id.clone();

    if !args.yes {
        let prompt = format!("Remove place '{}'?", place.name);
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    catalog.remove_place(&store, &id)?;
    if !global.quiet {
        println!("{} Removed place {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn place_row(place: &StoragePlace) -> TableRow {
    TableRow::new(place.id.to_string())
        .cell("id", CellValue::Id(place.id.to_string()))
        .cell("name", CellValue::Text(place.name.clone()))
        .cell("location", CellValue::Text(place.location.clone()))
        .cell("type", CellValue::Text(place.kind.clone()))
}
