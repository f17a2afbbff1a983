//! Catalog loading from the record file and the icon directory.

use super::{Catalog, CatalogRecord, ItemId};
use crate::error::{Error, Result, ResultExt};
use image::RgbaImage;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Opening bracket at which long display names are broken onto a second line.
const NAME_BREAK: char = '（';

/// Suffix appended to the id in icon file names.
const ICON_SUFFIX: &str = "31";

/// Path of the icon for `id`: `<dir>/{id}31.<extension>`.
pub fn icon_path(dir: &Path, id: ItemId, extension: &str) -> PathBuf {
    dir.join(format!("{}{}.{}", id, ICON_SUFFIX, extension))
}

/// Load the catalog, degrading to an empty one on any failure.
pub fn load_catalog_or_empty(record_file: &Path, icon_dir: &Path, extension: &str) -> Catalog {
    load_catalog(record_file, icon_dir, extension)
        .unwrap_or_warn_default(Catalog::empty(), "Failed to load catalog")
}

/// Load the record file and every referenced icon.
///
/// The first line of the record file is a header. Each further non-blank
/// line is `id,name,sortKey,group,alias`; extra fields are ignored.
pub fn load_catalog(record_file: &Path, icon_dir: &Path, extension: &str) -> Result<Catalog> {
    let contents = fs::read_to_string(record_file).map_err(|e| Error::CatalogLoad {
        path: record_file.to_path_buf(),
        message: e.to_string(),
    })?;

    let records = parse_records(&contents).map_err(|message| Error::CatalogLoad {
        path: record_file.to_path_buf(),
        message,
    })?;

    let mut icons = HashMap::with_capacity(records.len());
    for record in &records {
        let path = icon_path(icon_dir, record.id, extension);
        icons.insert(record.id, load_icon(&path)?);
    }
    debug!("Loaded {} icons from {}", icons.len(), icon_dir.display());

    let catalog = Catalog::from_parts(records, icons).map_err(|e| match e {
        Error::CatalogLoad { message, .. } => Error::CatalogLoad {
            path: record_file.to_path_buf(),
            message,
        },
        other => other,
    })?;

    info!(
        "Catalog loaded: {} items in {} groups",
        catalog.len(),
        catalog.groups().len()
    );
    Ok(catalog)
}

fn load_icon(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| Error::CatalogLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(image.to_rgba8())
}

/// Parse the record file contents.
///
/// Returns a message naming the offending line on the first malformed record.
pub fn parse_records(contents: &str) -> std::result::Result<Vec<CatalogRecord>, String> {
    contents
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(line).map_err(|e| format!("line {}: {}", index + 1, e)))
        .collect()
}

fn parse_line(line: &str) -> std::result::Result<CatalogRecord, String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }

    let id = fields[0]
        .trim()
        .parse::<ItemId>()
        .map_err(|_| format!("invalid id '{}'", fields[0]))?;
    let sort_key = fields[2]
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid sort key '{}'", fields[2]))?;

    Ok(CatalogRecord::new(
        id,
        break_display_name(fields[1]),
        sort_key,
        fields[3],
        fields[4],
    ))
}

/// Split `name` onto two lines before its parenthetical suffix.
fn break_display_name(name: &str) -> String {
    match name.find(NAME_BREAK) {
        Some(index) => format!("{}\n{}", &name[..index], &name[index..]),
        None => name.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    const RECORDS: &str = "id,name,range,group,alias\n\
        100101,日和,200,前卫,日和\n\
        100201,优衣（夏日）,800,后卫,水优衣\n\
        \n\
        100301,怜,250,前卫,怜\n";

    fn write_icons(dir: &Path, ids: &[ItemId]) {
        for &id in ids {
            let img = RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 255]));
            img.save(icon_path(dir, id, "png")).expect("save icon");
        }
    }

    #[test]
    fn test_break_display_name() {
        assert_eq!(break_display_name("优衣（夏日）"), "优衣\n（夏日）");
        assert_eq!(break_display_name("日和"), "日和");
        assert_eq!(break_display_name("（x）"), "\n（x）");
    }

    #[test]
    fn test_icon_path_naming() {
        let path = icon_path(Path::new("CharacterIcons"), 100101, "jpg");
        assert_eq!(path, Path::new("CharacterIcons").join("10010131.jpg"));
    }

    #[test]
    fn test_parse_records_skips_header_and_blank_lines() {
        let records = parse_records(RECORDS).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, 100101);
        assert_eq!(records[1].display_name, "优衣\n（夏日）");
        assert_eq!(records[1].sort_key, 800);
        assert_eq!(records[1].group_name, "后卫");
        assert_eq!(records[1].alias_text, "水优衣");
    }

    #[test]
    fn test_parse_records_handles_crlf() {
        let records = parse_records("h\r\n1,a,2,g,x\r\n").unwrap();
        assert_eq!(records[0].alias_text, "x");
    }

    #[test]
    fn test_parse_records_rejects_bad_lines() {
        let err = parse_records("h\n1,a,2,g,x\nabc,b,3,g,y\n").unwrap_err();
        assert!(err.starts_with("line 3"));

        let err = parse_records("h\n1,a,2\n").unwrap_err();
        assert!(err.contains("expected 5 fields"));
    }

    #[test]
    fn test_load_catalog_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let record_file = dir.path().join("CharacterInfo.csv");
        fs::write(&record_file, RECORDS).unwrap();
        write_icons(dir.path(), &[100101, 100201, 100301]);

        let catalog = load_catalog(&record_file, dir.path(), "png").unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.groups().len(), 2);
        assert_eq!(catalog.groups()[0].name, "前卫");
        assert_eq!(catalog.groups()[0].members, vec![100101, 100301]);
        assert_eq!(catalog.icon(100201).unwrap().dimensions(), (8, 8));
    }

    #[test]
    fn test_missing_icon_degrades_to_empty() {
        let dir = TempDir::new().expect("tempdir");
        let record_file = dir.path().join("CharacterInfo.csv");
        fs::write(&record_file, RECORDS).unwrap();
        write_icons(dir.path(), &[100101, 100201]);

        assert!(load_catalog(&record_file, dir.path(), "png").is_err());
        let catalog = load_catalog_or_empty(&record_file, dir.path(), "png");
        assert!(catalog.is_empty());
        assert!(catalog.groups().is_empty());
    }

    #[test]
    fn test_missing_record_file_degrades_to_empty() {
        let dir = TempDir::new().expect("tempdir");
        let catalog = load_catalog_or_empty(&dir.path().join("nope.csv"), dir.path(), "png");
        assert!(catalog.is_empty());
    }
}
