//! Mountaineer Dynamics Institute CLI - drive the course cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a seat on a course session
//! mdi cart add C1 "Intro to Alpine Travel" 99.00 2024-01-01 "Base Camp"
//!
//! # Show the cart and its total
//! mdi cart list
//! mdi cart total
//!
//! # Change or drop an entry
//! mdi cart update C1 2024-01-01 3
//! mdi cart remove C1 2024-01-01
//!
//! # Check an address the way the site forms do
//! mdi validate-email climber@example.com
//! ```
//!
//! The cart lives in the JSON file named by `MDI_CART_STORE_PATH`, so
//! successive runs behave like reloads of the same browser profile.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mdi_site::config::SiteConfig;
use mdi_site::error::SiteError;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod surface;

#[derive(Parser)]
#[command(name = "mdi")]
#[command(author, version, about = "Mountaineer Dynamics Institute course cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the course cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check an email address
    ValidateEmail {
        /// Address to check
        email: String,
    },
    /// Send the contact form
    Contact {
        /// Sender name
        #[arg(short, long)]
        name: String,

        /// Reply-to address
        #[arg(short, long)]
        email: String,

        /// Message body
        #[arg(short, long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one seat on a course session
    Add {
        /// Course identifier
        id: String,
        /// Course name shown in the cart
        name: String,
        /// Price per seat, e.g. `99.00` or `$1,249`
        price: String,
        /// Session date (`YYYY-MM-DD`)
        date: String,
        /// Where the session runs
        location: String,
    },
    /// Remove a course session
    Remove {
        /// Course identifier
        id: String,
        /// Session date
        date: String,
    },
    /// Set the number of seats for a session
    Update {
        /// Course identifier
        id: String,
        /// Session date
        date: String,
        /// New quantity; values below 1 become 1
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// List cart entries
    List,
    /// Show seat count and total price
    Total,
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SiteConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Map tracing levels to Sentry: warnings and errors become events, the rest
/// breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() {
    let config = SiteConfig::from_env();

    // Sentry must be initialized before the subscriber so the layer sees a client
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mdi_site=info,mdi_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result = config
        .map_err(SiteError::from)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        e.report();
        surface::print_error(&e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &SiteConfig) -> mdi_site::error::Result<()> {
    match cli.command {
        Commands::Cart { action } => {
            let mut cart = commands::cart::open(config);
            match action {
                CartAction::Add {
                    id,
                    name,
                    price,
                    date,
                    location,
                } => commands::cart::add(&mut cart, &id, &name, &price, &date, &location)?,
                CartAction::Remove { id, date } => commands::cart::remove(&mut cart, &id, &date)?,
                CartAction::Update { id, date, quantity } => {
                    commands::cart::update(&mut cart, &id, &date, quantity)?;
                }
                CartAction::List => commands::cart::list(&cart),
                CartAction::Total => commands::cart::total(&cart),
                CartAction::Clear => commands::cart::clear(&mut cart)?,
            }
        }
        Commands::ValidateEmail { email } => commands::forms::validate_email(&email)?,
        Commands::Contact {
            name,
            email,
            message,
        } => commands::forms::contact(&name, &email, &message)?,
    }

    Ok(())
}
