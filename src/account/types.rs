//! Phone account record and its wire encoding

use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use url::Url;

use super::resources::ResourceId;
use crate::component::ComponentName;
use crate::encoding::{CanonicalDeserialize, CanonicalSerialize};
use crate::error::{PhoneAccountError, Result};

/// A distinct account, line of service or call placement method that can be
/// used to place and receive phone calls.
///
/// Immutable once built. Label, description and icon are stored as resource
/// ids into the owning package and resolved on demand (see
/// [`PhoneAccount::label`]).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhoneAccount {
    component_name: ComponentName,
    id: String,
    handle: Option<Url>,
    label_res_id: ResourceId,
    short_description_res_id: ResourceId,
    icon_res_id: ResourceId,
    is_enabled: bool,
    is_system_default: bool,
}

impl PhoneAccount {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        component_name: ComponentName,
        id: impl Into<String>,
        handle: Option<Url>,
        label_res_id: ResourceId,
        short_description_res_id: ResourceId,
        icon_res_id: ResourceId,
        is_enabled: bool,
        is_system_default: bool,
    ) -> Self {
        Self {
            component_name,
            id: id.into(),
            handle,
            label_res_id,
            short_description_res_id,
            icon_res_id,
            is_enabled,
            is_system_default,
        }
    }

    /// Start a builder with no handle, no resources, disabled and not default.
    pub fn builder(component_name: ComponentName, id: impl Into<String>) -> PhoneAccountBuilder {
        PhoneAccountBuilder {
            account: Self::new(
                component_name,
                id,
                None,
                ResourceId::NONE,
                ResourceId::NONE,
                ResourceId::NONE,
                false,
                false,
            ),
        }
    }

    /// The service responsible for making calls with this account.
    pub fn component_name(&self) -> &ComponentName {
        &self.component_name
    }

    /// Identifier generated by, and meaningful to, the owning service.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Address outgoing calls appear to come from and incoming calls may be
    /// addressed to, e.g. `tel:+15551234567`.
    pub fn handle(&self) -> Option<&Url> {
        self.handle.as_ref()
    }

    pub fn label_res_id(&self) -> ResourceId {
        self.label_res_id
    }

    pub fn short_description_res_id(&self) -> ResourceId {
        self.short_description_res_id
    }

    pub fn icon_res_id(&self) -> ResourceId {
        self.icon_res_id
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn is_system_default(&self) -> bool {
        self.is_system_default
    }

    /// Parse the wire form of a handle. The empty string means "no handle".
    ///
    /// Handles must be absolute URIs: a bare number such as `5551234567` is
    /// rejected as `MalformedHandle` and needs a scheme, e.g. `tel:5551234567`.
    pub fn parse_handle(raw: &str) -> Result<Option<Url>> {
        if raw.is_empty() {
            return Ok(None);
        }
        Url::parse(raw)
            .map(Some)
            .map_err(|e| PhoneAccountError::MalformedHandle {
                handle: raw.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn encode_list(accounts: &[PhoneAccount]) -> Result<Vec<u8>> {
        accounts.try_to_bytes()
    }

    pub fn decode_list(bytes: &[u8]) -> Result<Vec<PhoneAccount>> {
        Vec::<PhoneAccount>::from_bytes(bytes)
    }
}

impl CanonicalSerialize for PhoneAccount {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.component_name.canonical_serialize(writer)?;
        self.id.canonical_serialize(writer)?;
        self.handle
            .as_ref()
            .map(Url::as_str)
            .unwrap_or("")
            .canonical_serialize(writer)?;
        self.label_res_id.canonical_serialize(writer)?;
        self.short_description_res_id.canonical_serialize(writer)?;
        self.icon_res_id.canonical_serialize(writer)?;
        self.is_enabled.canonical_serialize(writer)?;
        self.is_system_default.canonical_serialize(writer)
    }
}

impl CanonicalDeserialize for PhoneAccount {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        let component_name = ComponentName::canonical_deserialize(reader)?;
        let id = String::canonical_deserialize(reader)?;
        let handle = Self::parse_handle(&String::canonical_deserialize(reader)?)?;
        Ok(Self {
            component_name,
            id,
            handle,
            label_res_id: ResourceId::canonical_deserialize(reader)?,
            short_description_res_id: ResourceId::canonical_deserialize(reader)?,
            icon_res_id: ResourceId::canonical_deserialize(reader)?,
            is_enabled: bool::canonical_deserialize(reader)?,
            is_system_default: bool::canonical_deserialize(reader)?,
        })
    }
}

/// Builder for [`PhoneAccount`].
#[derive(Clone, Debug)]
pub struct PhoneAccountBuilder {
    account: PhoneAccount,
}

impl PhoneAccountBuilder {
    pub fn handle(mut self, handle: Url) -> Self {
        self.account.handle = Some(handle);
        self
    }

    pub fn label(mut self, res_id: ResourceId) -> Self {
        self.account.label_res_id = res_id;
        self
    }

    pub fn short_description(mut self, res_id: ResourceId) -> Self {
        self.account.short_description_res_id = res_id;
        self
    }

    pub fn icon(mut self, res_id: ResourceId) -> Self {
        self.account.icon_res_id = res_id;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.account.is_enabled = enabled;
        self
    }

    pub fn system_default(mut self, system_default: bool) -> Self {
        self.account.is_system_default = system_default;
        self
    }

    pub fn build(self) -> PhoneAccount {
        self.account
    }
}
