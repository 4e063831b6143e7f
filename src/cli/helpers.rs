//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::Catalog;
use crate::core::config::Config;
use crate::core::identity::RecordId;
use crate::core::store::Store;
use crate::entities::{Item, StoragePlace};

/// Open the configured database and load the catalog from it
pub fn open_catalog(global: &GlobalOpts) -> Result<(Store, Catalog, Config)> {
    let config = Config::load();
    let path = config.database(global.database.as_deref());
    let store = Store::open(&path)?;
    let catalog = Catalog::load(&store)?;
    Ok((store, catalog, config))
}

/// Resolve the output format: flag, then configured default, then tsv
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if let Some(format) = global.format {
        return format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(OutputFormat::Tsv)
}

/// Resolve a place from an id or unique id prefix.
///
/// `Ok(None)` means nothing matched; an ambiguous prefix is an error.
pub fn find_place<'a>(catalog: &'a Catalog, selector: &str) -> Result<Option<&'a StoragePlace>> {
    let id: RecordId = selector.parse().into_diagnostic()?;
    if let Some(place) = catalog.place(&id) {
        return Ok(Some(place));
    }

    let matches: Vec<&StoragePlace> = catalog
        .places()
        .iter()
        .filter(|p| p.id.as_str().starts_with(id.as_str()))
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0])),
        n => Err(miette::miette!(
            "place id prefix '{}' is ambiguous ({} matches)",
            selector,
            n
        )),
    }
}

/// Resolve an item from an id or unique id prefix; see [`find_place`]
pub fn find_item<'a>(catalog: &'a Catalog, selector: &str) -> Result<Option<&'a Item>> {
    let id: RecordId = selector.parse().into_diagnostic()?;
    if let Some(row) = catalog.item(&id) {
        return Ok(Some(&row.item));
    }

    let matches: Vec<&Item> = catalog
        .items()
        .iter()
        .map(|r| &r.item)
        .filter(|i| i.id.as_str().starts_with(id.as_str()))
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0])),
        n => Err(miette::miette!(
            "item id prefix '{}' is ambiguous ({} matches)",
            selector,
            n
        )),
    }
}

/// Format a string ID for display, truncating if too long
pub fn format_short_id_str(id: &str) -> String {
    if id.chars().count() > 16 {
        let prefix: String = id.chars().take(13).collect();
        format!("{}...", prefix)
    } else {
        id.to_string()
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated.
///
/// Counts characters, not bytes, so multibyte names never split mid-char.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}

/// Escape a string for CSV output (RFC 4180)
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_short_id_str() {
        assert_eq!(format_short_id_str("-1"), "-1");
        assert_eq!(
            format_short_id_str("0123456789abcdef0123456789abcdef"),
            "0123456789abc..."
        );
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        let name = "é".repeat(30);
        let out = truncate_str(&name, 28);
        assert_eq!(out.chars().count(), 28);
        assert!(out.ends_with("..."));

        assert_eq!(truncate_str("héllo", 10), "héllo");
    }

    #[test]
    fn test_format_short_id_str_multibyte() {
        let id = "ä".repeat(20);
        let out = format_short_id_str(&id);
        assert_eq!(out.chars().count(), 16);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_find_place_by_prefix() {
        let store = Store::open_in_memory().unwrap();
        let mut catalog = Catalog::load(&store).unwrap();
        let place = StoragePlace::new("Shelf", "Garage", "Shelf");
        let id = place.id.clone();
        catalog.add_place(&store, place).unwrap();

        let by_full = find_place(&catalog, id.as_str()).unwrap();
        assert_eq!(by_full.unwrap().id, id);

        let by_prefix = find_place(&catalog, &id.as_str()[..8]).unwrap();
        assert_eq!(by_prefix.unwrap().id, id);

        assert!(find_place(&catalog, "zzzz").unwrap().is_none());
    }
}
