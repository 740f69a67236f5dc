//! In-memory resource table.
//!
//! Used by the CLI to resolve account resources from a TOML file:
//!
//! ```toml
//! [[packages]]
//! name = "com.example.dialer"
//!
//! [[packages.strings]]
//! id = 1
//! text = "Dialer"
//!
//! [[packages.icons]]
//! id = 3
//! bytes = "89504e47"      # hex
//! density = 240           # optional; omitted means the default variant
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::resources::{Density, Icon, PackageResources, ResourceId, ResourceResolver};
use crate::error::ResourceError;

#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    packages: HashMap<String, PackageTable>,
}

#[derive(Clone, Debug, Default)]
struct PackageTable {
    strings: HashMap<ResourceId, String>,
    icons: HashMap<ResourceId, IconVariants>,
}

#[derive(Clone, Debug, Default)]
struct IconVariants {
    default: Option<Vec<u8>>,
    by_density: HashMap<u32, Vec<u8>>,
}

// --- File format ---

#[derive(Deserialize)]
struct TableFile {
    #[serde(default)]
    packages: Vec<PackageFile>,
}

#[derive(Deserialize)]
struct PackageFile {
    name: String,
    #[serde(default)]
    strings: Vec<StringEntry>,
    #[serde(default)]
    icons: Vec<IconEntry>,
}

#[derive(Deserialize)]
struct StringEntry {
    id: i32,
    text: String,
}

#[derive(Deserialize)]
struct IconEntry {
    id: i32,
    bytes: String,
    density: Option<u32>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::InvalidTable(format!("{}: {}", path.display(), e)))?;
        let table = Self::from_toml_str(&content)?;
        debug!("Loaded resources for {} packages from {}", table.packages.len(), path.display());
        Ok(table)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ResourceError> {
        let file: TableFile = toml::from_str(s).map_err(|e| ResourceError::InvalidTable(e.to_string()))?;
        let mut table = Self::new();
        for package in file.packages {
            // register the package even if it declares nothing
            table.packages.entry(package.name.clone()).or_default();
            for entry in package.strings {
                table.insert_string(&package.name, ResourceId(entry.id), entry.text);
            }
            for entry in package.icons {
                let bytes = hex::decode(entry.bytes.trim()).map_err(|e| {
                    ResourceError::InvalidTable(format!("icon {} in {}: {}", entry.id, package.name, e))
                })?;
                match entry.density {
                    Some(dpi) => table.insert_icon_for_density(&package.name, ResourceId(entry.id), Density::Dpi(dpi), bytes),
                    None => table.insert_icon(&package.name, ResourceId(entry.id), bytes),
                }
            }
        }
        Ok(table)
    }

    pub fn insert_string(&mut self, package: &str, res_id: ResourceId, text: impl Into<String>) {
        self.package_mut(package).strings.insert(res_id, text.into());
    }

    /// Register the variant served when no density is requested, or when the
    /// requested density has no variant of its own.
    pub fn insert_icon(&mut self, package: &str, res_id: ResourceId, bytes: Vec<u8>) {
        self.package_mut(package).icons.entry(res_id).or_default().default = Some(bytes);
    }

    /// `Density::Default` is the same as [`ResourceTable::insert_icon`].
    pub fn insert_icon_for_density(&mut self, package: &str, res_id: ResourceId, density: Density, bytes: Vec<u8>) {
        let variants = self.package_mut(package).icons.entry(res_id).or_default();
        match density {
            Density::Default => variants.default = Some(bytes),
            Density::Dpi(dpi) => {
                variants.by_density.insert(dpi, bytes);
            }
        }
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    fn package_mut(&mut self, package: &str) -> &mut PackageTable {
        self.packages.entry(package.to_string()).or_default()
    }
}

struct PackageView<'a> {
    name: &'a str,
    table: &'a PackageTable,
}

impl PackageResources for PackageView<'_> {
    fn string(&self, res_id: ResourceId) -> Option<String> {
        self.table.strings.get(&res_id).cloned()
    }

    fn drawable(&self, res_id: ResourceId, density: Density) -> Result<Icon, ResourceError> {
        let not_found = || ResourceError::IconNotFound {
            package: self.name.to_string(),
            res_id,
            density,
        };
        let variants = self.table.icons.get(&res_id).ok_or_else(not_found)?;
        let exact = match density {
            Density::Dpi(dpi) => variants.by_density.get(&dpi).map(|bytes| (density, bytes)),
            Density::Default => None,
        };
        let (served, bytes) = exact
            .or_else(|| variants.default.as_ref().map(|bytes| (Density::Default, bytes)))
            .ok_or_else(not_found)?;
        Ok(Icon {
            res_id,
            density: served,
            bytes: bytes.clone(),
        })
    }
}

impl ResourceResolver for ResourceTable {
    fn package_resources<'a>(&'a self, package: &str) -> Result<Box<dyn PackageResources + 'a>, ResourceError> {
        let (name, table) = self
            .packages
            .get_key_value(package)
            .ok_or_else(|| ResourceError::PackageNotFound(package.to_string()))?;
        Ok(Box::new(PackageView { name, table }))
    }
}
