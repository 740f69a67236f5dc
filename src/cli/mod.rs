pub mod account;

use clap::{Parser, Subcommand};

use crate::config::PhoneAccountConfig;

#[derive(Parser)]
#[command(name = "phone_account")]
#[command(about = "Encode, decode and inspect phone account records", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "phone_account.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a record from flags and print its wire encoding as hex
    Encode {
        /// Owning service as package/class (".Class" is relative to the package)
        #[arg(long)]
        component: String,
        #[arg(long)]
        id: String,
        /// Handle URI, e.g. tel:+15551234567
        #[arg(long)]
        handle: Option<String>,
        #[arg(long, default_value_t = 0)]
        label: i32,
        #[arg(long, default_value_t = 0)]
        short_description: i32,
        #[arg(long, default_value_t = 0)]
        icon: i32,
        #[arg(long)]
        enabled: bool,
        #[arg(long)]
        system_default: bool,
    },
    /// Decode a hex wire encoding and print the record as JSON
    Decode {
        hex: String,
    },
    /// Decode a record and resolve its label, description and icon
    Describe {
        hex: String,
        /// Resource table (TOML); falls back to the config's table_path
        #[arg(long)]
        resources: Option<String>,
        /// Icon density in dpi; falls back to the config's default_density
        #[arg(long)]
        density: Option<u32>,
    },
}

pub fn run(command: Commands, config: &PhoneAccountConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Encode {
            component,
            id,
            handle,
            label,
            short_description,
            icon,
            enabled,
            system_default,
        } => {
            let args = account::EncodeArgs {
                component,
                id,
                handle,
                label,
                short_description,
                icon,
                enabled,
                system_default,
            };
            println!("{}", account::handle_encode(&args)?);
        }
        Commands::Decode { hex } => {
            println!("{}", account::handle_decode(&hex)?);
        }
        Commands::Describe { hex, resources, density } => {
            println!("{}", account::handle_describe(&hex, resources.as_deref(), density, config)?);
        }
    }
    Ok(())
}
