pub mod account;
pub mod component;
pub mod encoding;
pub mod error;
pub mod config;
pub mod cli;

pub use account::{Density, Icon, PhoneAccount, ResourceId, ResourceResolver, ResourceTable};
pub use component::ComponentName;
pub use error::{PhoneAccountError, ResourceError};
