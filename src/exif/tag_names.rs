//! Exif tag name tables
//!
//! Tag names are kept in `exif_tags.toml`, one table per directory kind,
//! and parsed once on first use.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::exif::ifd::IfdKind;
use crate::meta::errors::{MetaError, MetaResult};

lazy_static! {
    static ref EXIF_TAG_NAMES: TagNameTables = {
        let content = include_str!("../../exif_tags.toml");
        TagNameTables::from_str(content).unwrap_or_else(|e| {
            log::warn!("Failed to parse Exif tag names: {}", e);
            TagNameTables::default()
        })
    };
}

/// Tag names per directory kind
#[derive(Debug, Default)]
pub struct TagNameTables {
    pub ifd0: HashMap<u16, String>,
    pub exif: HashMap<u16, String>,
    pub gps: HashMap<u16, String>,
    pub interop: HashMap<u16, String>,
}

impl TagNameTables {
    /// Parse tag names from a TOML string
    pub fn from_str(content: &str) -> MetaResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| MetaError::GenericError(format!("Failed to parse TOML: {}", e)))?;

        let mut tables = TagNameTables::default();
        Self::parse_table(&toml_value, "ifd0", &mut tables.ifd0);
        Self::parse_table(&toml_value, "exif", &mut tables.exif);
        Self::parse_table(&toml_value, "gps", &mut tables.gps);
        Self::parse_table(&toml_value, "interop", &mut tables.interop);

        Ok(tables)
    }

    fn parse_table(value: &toml::Value, section: &str, target: &mut HashMap<u16, String>) {
        if let Some(table) = value.get(section).and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                    target.insert(id, name.to_string());
                }
            }
        }
    }

    fn lookup(&self, kind: IfdKind, id: u16) -> Option<&str> {
        let table = match kind {
            IfdKind::Ifd0 | IfdKind::SubIfd => &self.ifd0,
            IfdKind::Exif => &self.exif,
            IfdKind::Gps => &self.gps,
            IfdKind::Interop => &self.interop,
            IfdKind::Null | IfdKind::MakerNote => return None,
        };
        table.get(&id).map(String::as_str)
    }
}

/// Get the name of a tag in a directory kind
///
/// Exif and IFD0 tags are looked up in both tables since writers are not
/// always careful about which directory a tag lands in.
pub fn tag_name(kind: IfdKind, id: u16) -> &'static str {
    let tables: &'static TagNameTables = &EXIF_TAG_NAMES;
    tables.lookup(kind, id)
        .or_else(|| match kind {
            IfdKind::Ifd0 | IfdKind::SubIfd => tables.lookup(IfdKind::Exif, id),
            IfdKind::Exif => tables.lookup(IfdKind::Ifd0, id),
            _ => None,
        })
        .unwrap_or("Unknown")
}
