use std::path::Path;
use tracing::info;

use crate::account::{Density, PhoneAccount, ResourceId, ResourceTable};
use crate::component::ComponentName;
use crate::config::PhoneAccountConfig;
use crate::encoding::{CanonicalDeserialize, CanonicalSerialize};
use crate::error::{PhoneAccountError, ResourceError};

pub struct EncodeArgs {
    pub component: String,
    pub id: String,
    pub handle: Option<String>,
    pub label: i32,
    pub short_description: i32,
    pub icon: i32,
    pub enabled: bool,
    pub system_default: bool,
}

pub fn handle_encode(args: &EncodeArgs) -> Result<String, PhoneAccountError> {
    let component: ComponentName = args.component.parse()?;
    let handle = PhoneAccount::parse_handle(args.handle.as_deref().unwrap_or(""))?;
    let account = PhoneAccount::new(
        component,
        args.id.clone(),
        handle,
        ResourceId(args.label),
        ResourceId(args.short_description),
        ResourceId(args.icon),
        args.enabled,
        args.system_default,
    );
    Ok(hex::encode(account.try_to_bytes()?))
}

pub fn decode_hex(input: &str) -> Result<PhoneAccount, PhoneAccountError> {
    let bytes = hex::decode(input.trim())
        .map_err(|e| PhoneAccountError::MalformedEncoding(format!("invalid hex: {}", e)))?;
    PhoneAccount::from_bytes(&bytes)
}

pub fn handle_decode(input: &str) -> Result<String, Box<dyn std::error::Error>> {
    let account = decode_hex(input)?;
    Ok(serde_json::to_string_pretty(&account)?)
}

pub fn handle_describe(
    input: &str,
    resources: Option<&str>,
    density: Option<u32>,
    config: &PhoneAccountConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let account = decode_hex(input)?;
    let path = resources
        .or(config.resources.table_path.as_deref())
        .ok_or_else(|| ResourceError::InvalidTable("no resource table given".to_string()))?;
    let table = ResourceTable::load(Path::new(path))?;
    let density = density.map(Density::Dpi).unwrap_or_else(|| config.resources.density());
    info!("Describing account {} of {}", account.id(), account.component_name());

    let icon = match account.icon_for_density(&table, density) {
        Some(icon) => format!("{} bytes ({})", icon.bytes.len(), icon.density),
        None => "-".to_string(),
    };
    let mut out = Vec::new();
    out.push(format!("Component:   {}", account.component_name().flatten_to_short_string()));
    out.push(format!("Id:          {}", account.id()));
    out.push(format!(
        "Handle:      {}",
        account.handle().map(|h| h.as_str()).unwrap_or("-")
    ));
    out.push(format!("Label:       {}", account.label(&table).unwrap_or_else(|| "-".to_string())));
    out.push(format!(
        "Description: {}",
        account.short_description(&table).unwrap_or_else(|| "-".to_string())
    ));
    out.push(format!("Icon:        {}", icon));
    out.push(format!("Enabled:     {}", account.is_enabled()));
    out.push(format!("Default:     {}", account.is_system_default()));
    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EncodeArgs {
        EncodeArgs {
            component: "com.example.dialer/.DialerService".to_string(),
            id: "acct-1".to_string(),
            handle: Some("tel:+15551234567".to_string()),
            label: 1,
            short_description: 0,
            icon: 0,
            enabled: true,
            system_default: false,
        }
    }

    #[test]
    fn test_encode_then_decode() {
        let hex = handle_encode(&args()).unwrap();
        let account = decode_hex(&hex).unwrap();
        assert_eq!(account.component_name().class_name(), "com.example.dialer.DialerService");
        assert_eq!(account.handle().unwrap().as_str(), "tel:+15551234567");
        assert_eq!(account.label_res_id(), ResourceId(1));
        assert!(account.is_enabled());

        let json = handle_decode(&hex).unwrap();
        assert!(json.contains("\"acct-1\""));
    }

    #[test]
    fn test_encode_rejects_bad_handle() {
        let mut bad = args();
        bad.handle = Some("not a uri".to_string());
        assert!(matches!(
            handle_encode(&bad),
            Err(PhoneAccountError::MalformedHandle { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_hex() {
        assert!(matches!(
            decode_hex("xyz"),
            Err(PhoneAccountError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_describe_resolves_from_table() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[packages]]
            name = "com.example.dialer"
            [[packages.strings]]
            id = 1
            text = "Dialer"
            "#
        )
        .unwrap();

        let hex = handle_encode(&args()).unwrap();
        let out = handle_describe(
            &hex,
            file.path().to_str(),
            None,
            &PhoneAccountConfig::default(),
        )
        .unwrap();
        assert!(out.contains("Label:       Dialer"));
        assert!(out.contains("Description: -"));
        assert!(out.contains("com.example.dialer/.DialerService"));
    }

    #[test]
    fn test_describe_without_table_fails() {
        let hex = handle_encode(&args()).unwrap();
        assert!(handle_describe(&hex, None, None, &PhoneAccountConfig::default()).is_err());
    }
}
