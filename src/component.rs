//! Identifier of the service implementation that owns an account.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use crate::encoding::{CanonicalDeserialize, CanonicalSerialize};
use crate::error::{PhoneAccountError, Result};

/// Package + class name pair, e.g. `com.example.dialer/com.example.dialer.DialerService`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName {
    package: String,
    class_name: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_name: class_name.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Class name relative to the package (`.DialerService`) when the class
    /// lives inside it, otherwise the full class name.
    pub fn short_class_name(&self) -> &str {
        match self.class_name.strip_prefix(self.package.as_str()) {
            Some(rest) if rest.starts_with('.') => rest,
            _ => &self.class_name,
        }
    }

    pub fn flatten_to_string(&self) -> String {
        format!("{}/{}", self.package, self.class_name)
    }

    pub fn flatten_to_short_string(&self) -> String {
        format!("{}/{}", self.package, self.short_class_name())
    }

    /// Parse `package/class`. A class beginning with `.` is relative to the package.
    pub fn unflatten_from_string(s: &str) -> Result<Self> {
        let (package, class) = s
            .split_once('/')
            .ok_or_else(|| PhoneAccountError::MalformedComponent(format!("missing '/' in '{}'", s)))?;
        if package.is_empty() || class.is_empty() {
            return Err(PhoneAccountError::MalformedComponent(format!(
                "empty package or class in '{}'",
                s
            )));
        }
        let class_name = if class.starts_with('.') {
            format!("{}{}", package, class)
        } else {
            class.to_string()
        };
        Ok(Self::new(package, class_name))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class_name)
    }
}

impl FromStr for ComponentName {
    type Err = PhoneAccountError;

    fn from_str(s: &str) -> Result<Self> {
        Self::unflatten_from_string(s)
    }
}

impl CanonicalSerialize for ComponentName {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.package.canonical_serialize(writer)?;
        self.class_name.canonical_serialize(writer)
    }
}

impl CanonicalDeserialize for ComponentName {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        let package = String::canonical_deserialize(reader)?;
        let class_name = String::canonical_deserialize(reader)?;
        Ok(Self { package, class_name })
    }
}
