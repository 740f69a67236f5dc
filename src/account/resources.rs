//! Resource lookups for an account's label, description and icon.
//!
//! Resources live in the package that owns the account. The platform side is
//! reached through [`ResourceResolver`]; the account never caches a result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Write};
use tracing::{debug, error, warn};

use super::types::PhoneAccount;
use crate::encoding::{CanonicalDeserialize, CanonicalSerialize};
use crate::error::{ResourceError, Result};

/// Integer id into a package's resource table. Zero means "no resource".
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ResourceId(pub i32);

impl ResourceId {
    pub const NONE: ResourceId = ResourceId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<i32> for ResourceId {
    fn from(raw: i32) -> Self {
        ResourceId(raw)
    }
}

impl CanonicalSerialize for ResourceId {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.0.canonical_serialize(writer)
    }
}

impl CanonicalDeserialize for ResourceId {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(ResourceId(i32::canonical_deserialize(reader)?))
    }
}

/// Display density an icon variant is drawn for.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Density {
    /// No particular density; the package picks its default variant.
    #[default]
    Default,
    Dpi(u32),
}

impl Density {
    pub const LOW: Density = Density::Dpi(120);
    pub const MEDIUM: Density = Density::Dpi(160);
    pub const HIGH: Density = Density::Dpi(240);
    pub const XHIGH: Density = Density::Dpi(320);
    pub const XXHIGH: Density = Density::Dpi(480);
    pub const XXXHIGH: Density = Density::Dpi(640);

    /// Sentinel used on the platform side for "no density".
    pub const NO_DENSITY: i32 = -1;

    /// Negative values mean [`Density::Default`].
    pub fn from_raw(raw: i32) -> Self {
        u32::try_from(raw).map(Density::Dpi).unwrap_or(Density::Default)
    }

    pub fn as_raw(&self) -> i32 {
        match self {
            Density::Default => Self::NO_DENSITY,
            Density::Dpi(dpi) => i32::try_from(*dpi).unwrap_or(i32::MAX),
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Density::Default => write!(f, "default density"),
            Density::Dpi(dpi) => write!(f, "{}dpi", dpi),
        }
    }
}

/// Image payload for an account icon. The bytes are opaque to this crate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    pub res_id: ResourceId,
    pub density: Density,
    pub bytes: Vec<u8>,
}

/// Resources of a single package.
pub trait PackageResources {
    fn string(&self, res_id: ResourceId) -> Option<String>;

    fn drawable(&self, res_id: ResourceId, density: Density) -> std::result::Result<Icon, ResourceError>;
}

/// Entry point into the platform's resource system.
pub trait ResourceResolver {
    /// Scope lookups to `package`. Unknown packages yield
    /// [`ResourceError::PackageNotFound`].
    fn package_resources<'a>(
        &'a self,
        package: &str,
    ) -> std::result::Result<Box<dyn PackageResources + 'a>, ResourceError>;
}

impl PhoneAccount {
    /// Short label for this account, looked up in the owning package.
    pub fn label(&self, resolver: &dyn ResourceResolver) -> Option<String> {
        self.resolve_string(resolver, self.label_res_id())
    }

    /// Short paragraph describing this account.
    pub fn short_description(&self, resolver: &dyn ResourceResolver) -> Option<String> {
        self.resolve_string(resolver, self.short_description_res_id())
    }

    /// Icon for this account at the package's default density.
    pub fn icon(&self, resolver: &dyn ResourceResolver) -> Option<Icon> {
        self.icon_for_density(resolver, Density::Default)
    }

    pub fn icon_for_density(&self, resolver: &dyn ResourceResolver, density: Density) -> Option<Icon> {
        let res_id = self.icon_res_id();
        if res_id.is_none() {
            debug!(account = %self.id(), "No icon resource set");
            return None;
        }
        let resources = self.owner_resources(resolver)?;
        match resources.drawable(res_id, density) {
            Ok(icon) => Some(icon),
            Err(e) => {
                error!(account = %self.id(), "{}", e);
                None
            }
        }
    }

    fn resolve_string(&self, resolver: &dyn ResourceResolver, res_id: ResourceId) -> Option<String> {
        if res_id.is_none() {
            debug!(account = %self.id(), "No string resource set");
            return None;
        }
        let resources = self.owner_resources(resolver)?;
        let result = resources.string(res_id);
        if result.is_none() {
            let miss = ResourceError::StringNotFound {
                package: self.component_name().package().to_string(),
                res_id,
            };
            warn!(account = %self.id(), "{}", miss);
        }
        result
    }

    fn owner_resources<'a>(&self, resolver: &'a dyn ResourceResolver) -> Option<Box<dyn PackageResources + 'a>> {
        match resolver.package_resources(self.component_name().package()) {
            Ok(resources) => Some(resources),
            Err(e) => {
                warn!(account = %self.id(), "{}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::ResourceTable;
    use crate::component::ComponentName;
    use std::cell::Cell;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn account(package: &str) -> PhoneAccount {
        PhoneAccount::builder(ComponentName::new(package, "DialerService"), "acct-1")
            .label(ResourceId(1))
            .short_description(ResourceId(2))
            .icon(ResourceId(3))
            .enabled(true)
            .build()
    }

    fn table() -> ResourceTable {
        let mut table = ResourceTable::new();
        table.insert_string("com.example.dialer", ResourceId(1), "Dialer");
        table.insert_string("com.example.dialer", ResourceId(2), "Calls over the cell network");
        table.insert_icon("com.example.dialer", ResourceId(3), vec![1, 2, 3]);
        table.insert_icon_for_density("com.example.dialer", ResourceId(3), Density::HIGH, vec![4, 5, 6]);
        table
    }

    /// Counts every package lookup and knows no packages.
    struct CountingResolver {
        lookups: Cell<usize>,
    }

    impl ResourceResolver for CountingResolver {
        fn package_resources<'a>(
            &'a self,
            package: &str,
        ) -> std::result::Result<Box<dyn PackageResources + 'a>, ResourceError> {
            self.lookups.set(self.lookups.get() + 1);
            Err(ResourceError::PackageNotFound(package.to_string()))
        }
    }

    #[test]
    fn test_resolves_label_and_description() {
        let table = table();
        let account = account("com.example.dialer");
        assert_eq!(account.label(&table).as_deref(), Some("Dialer"));
        assert_eq!(
            account.short_description(&table).as_deref(),
            Some("Calls over the cell network")
        );
    }

    #[test]
    fn test_resolves_icon_by_density() {
        let table = table();
        let account = account("com.example.dialer");

        let icon = account.icon(&table).unwrap();
        assert_eq!(icon.bytes, vec![1, 2, 3]);
        assert_eq!(icon.density, Density::Default);

        let icon = account.icon_for_density(&table, Density::HIGH).unwrap();
        assert_eq!(icon.bytes, vec![4, 5, 6]);
        assert_eq!(icon.density, Density::HIGH);
    }

    #[test]
    fn test_unknown_package_yields_none() {
        let resolver = CountingResolver { lookups: Cell::new(0) };
        let account = account("com.example.missing");
        assert_eq!(account.label(&resolver), None);
        assert_eq!(account.short_description(&resolver), None);
        assert_eq!(account.icon(&resolver), None);
        assert_eq!(account.icon_for_density(&resolver, Density::XHIGH), None);
        assert_eq!(resolver.lookups.get(), 4);
    }

    #[test]
    fn test_missing_resource_in_known_package_yields_none() {
        let table = table();
        let account = PhoneAccount::builder(ComponentName::new("com.example.dialer", "DialerService"), "acct-2")
            .label(ResourceId(40))
            .icon(ResourceId(41))
            .build();
        assert_eq!(account.label(&table), None);
        assert_eq!(account.icon(&table), None);
    }

    #[test]
    fn test_zero_resource_ids_skip_lookup() {
        let resolver = CountingResolver { lookups: Cell::new(0) };
        let account = PhoneAccount::builder(ComponentName::new("com.example.dialer", "DialerService"), "acct-3").build();
        assert_eq!(account.label(&resolver), None);
        assert_eq!(account.icon(&resolver), None);
        assert_eq!(resolver.lookups.get(), 0);
    }

    #[test]
    fn test_lookups_are_not_cached() {
        let resolver = CountingResolver { lookups: Cell::new(0) };
        let account = account("com.example.dialer");
        account.label(&resolver);
        account.label(&resolver);
        assert_eq!(resolver.lookups.get(), 2);
    }

    /// Records the level of every event emitted while installed.
    #[derive(Clone, Default)]
    struct LevelCapture {
        levels: Arc<Mutex<Vec<Level>>>,
    }

    impl<S: tracing::Subscriber> Layer<S> for LevelCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.levels.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn captured_levels(f: impl FnOnce()) -> Vec<Level> {
        let capture = LevelCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, f);
        let levels = capture.levels.lock().unwrap().clone();
        levels
    }

    #[test]
    fn test_unknown_package_logs_warning() {
        let resolver = CountingResolver { lookups: Cell::new(0) };
        let account = account("com.example.missing");
        let levels = captured_levels(|| {
            assert_eq!(account.label(&resolver), None);
        });
        assert_eq!(levels, vec![Level::WARN]);

        // package misses warn even on the icon path
        let levels = captured_levels(|| {
            assert_eq!(account.icon(&resolver), None);
        });
        assert_eq!(levels, vec![Level::WARN]);
    }

    #[test]
    fn test_missing_string_logs_warning() {
        let table = table();
        let account = PhoneAccount::builder(ComponentName::new("com.example.dialer", "DialerService"), "acct-2")
            .label(ResourceId(40))
            .build();
        let levels = captured_levels(|| {
            assert_eq!(account.label(&table), None);
        });
        assert_eq!(levels, vec![Level::WARN]);
    }

    #[test]
    fn test_missing_icon_logs_error() {
        let table = table();
        let account = PhoneAccount::builder(ComponentName::new("com.example.dialer", "DialerService"), "acct-2")
            .icon(ResourceId(41))
            .build();
        let levels = captured_levels(|| {
            assert_eq!(account.icon_for_density(&table, Density::HIGH), None);
        });
        assert_eq!(levels, vec![Level::ERROR]);
    }

    #[test]
    fn test_successful_lookup_logs_nothing_above_debug() {
        let table = table();
        let account = account("com.example.dialer");
        let levels = captured_levels(|| {
            account.label(&table);
            account.icon(&table);
        });
        assert!(levels.iter().all(|level| *level > Level::INFO), "{:?}", levels);
    }

    #[test]
    fn test_density_raw_mapping() {
        assert_eq!(Density::from_raw(-1), Density::Default);
        assert_eq!(Density::from_raw(240), Density::HIGH);
        assert_eq!(Density::Default.as_raw(), Density::NO_DENSITY);
        assert_eq!(Density::XXHIGH.as_raw(), 480);
    }
}
