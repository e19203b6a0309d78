//! Operator CLI.
//!
//! # Responsibility
//! - Verify `mydaily_core` linkage (`ping`).
//! - Seed user accounts into a store file, since the HTTP surface has no
//!   registration route.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use mydaily_core::{hash_password, AuthService, PasswordScheme, SqliteStore};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "mydaily", version, about = "MyDaily operator tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints core linkage and version.
    Ping,
    /// Registers a user in the given store file.
    AddUser {
        #[arg(long)]
        db: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Store the password as plain text instead of an Argon2 hash.
        #[arg(long)]
        plain: bool,
    },
    /// Prints the Argon2 PHC string for a password.
    HashPassword { password: String },
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Ping => {
            println!("mydaily_core ping={}", mydaily_core::ping());
            println!("mydaily_core version={}", mydaily_core::core_version());
        }
        Command::AddUser {
            db,
            email,
            password,
            plain,
        } => {
            let store = SqliteStore::open(&db).with_context(|| format!("failed to open `{db}`"))?;
            let scheme = if plain {
                PasswordScheme::Plain
            } else {
                PasswordScheme::Argon2
            };
            let user = AuthService::new(Arc::new(store))
                .register_user(&email, &password, scheme)
                .context("failed to register user")?;
            println!("registered {} ({scheme:?})", user.email);
        }
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password).map_err(|err| anyhow!(err))?);
        }
    }
    Ok(())
}
