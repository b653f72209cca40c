//! CLI interface for VaporZone

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::api::TipoTransaccion;

#[derive(Parser)]
#[command(name = "vaporzone")]
#[command(version)]
#[command(about = "VaporZone shop back-office client", long_about = None)]
pub struct Cli {
    /// Path to a vaporzone.toml (defaults to searching upward from the current directory)
    #[arg(long, global = true, env = "VAPORZONE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true, env = "VAPORZONE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default vaporzone.toml in the current directory
    Init,

    /// Sign in and keep the token for later commands
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "VAPORZONE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show who is signed in
    Whoami,

    /// Show what navigating to a path would do
    Open {
        /// Path such as /contabilidad
        path: String,
    },

    /// Public product showcase
    Catalogo {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Manage the product inventory
    Inventario {
        #[command(subcommand)]
        action: InventarioAction,
    },

    /// Show income, investment and profit totals
    Contabilidad {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List or record transactions
    Transacciones {
        #[command(subcommand)]
        action: TransaccionesAction,
    },
}

#[derive(Subcommand)]
pub enum InventarioAction {
    /// List all products
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a product
    Add {
        #[arg(short, long)]
        nombre: String,

        #[arg(short, long)]
        precio: String,

        #[arg(short, long)]
        stock: String,

        #[arg(short, long)]
        descripcion: Option<String>,
    },

    /// Change fields of an existing product
    Edit {
        id: i64,

        #[arg(short, long)]
        nombre: Option<String>,

        #[arg(short, long)]
        precio: Option<String>,

        #[arg(short, long)]
        stock: Option<String>,

        #[arg(short, long)]
        descripcion: Option<String>,
    },

    /// Delete a product
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Upload a product picture
    Imagen {
        id: i64,

        /// Image file (png, jpg, gif, webp)
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum TransaccionesAction {
    /// List recorded transactions
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Record a transaction, checking stock first
    Add {
        #[arg(short, long, value_enum)]
        tipo: TipoTransaccion,

        #[arg(short, long)]
        monto: String,

        #[arg(short, long)]
        descripcion: String,

        /// Product id
        #[arg(short, long)]
        producto: i64,

        #[arg(short, long)]
        cantidad: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
