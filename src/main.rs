//! # Shelfcode CLI
//!
//! Command-line interface for warehouse barcodes and labels.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive menu (default)
//! shelfcode
//!
//! # List the catalog, or dump it as JSON
//! shelfcode list
//! shelfcode list --json
//!
//! # Terminal barcode preview plus the scannable PNG
//! shelfcode barcode A001
//!
//! # Labels for one category
//! shelfcode labels --category Tools
//!
//! # Send a label straight to the printer
//! shelfcode print --label --send A001
//! ```

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shelfcode::{
    Catalog, Compositor, OutputDirs, ShelfError,
    console::{Session, menu},
    platform,
};

/// Shelfcode - Warehouse barcode and label utility
#[derive(Parser, Debug)]
#[command(name = "shelfcode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Inventory catalog (CSV with a header row)
    #[arg(long, global = true, default_value = "items.csv")]
    catalog: PathBuf,

    /// Directory for barcode and QR images
    #[arg(long, global = true, default_value = "barcodes")]
    barcode_dir: PathBuf,

    /// Directory for composed labels
    #[arg(long, global = true, default_value = "labels")]
    label_dir: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the interactive menu
    Menu,

    /// List all items
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every field of one item
    Show {
        /// Item ID (case-insensitive)
        id: String,
    },

    /// Find items whose name contains a query
    Search {
        query: String,
    },

    /// Preview an item's barcode and write the scannable image
    Barcode {
        id: String,
    },

    /// Write an item's QR code and preview it
    Qr {
        id: String,
    },

    /// Compose one label
    Label {
        id: String,

        /// Open the label in the default viewer
        #[arg(long)]
        open: bool,
    },

    /// Compose labels for every item, or one category
    Labels {
        /// Only items in this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },

    /// Generate a barcode (or label) and print it
    Print {
        id: String,

        /// Print the composed label instead of the bare barcode
        #[arg(long)]
        label: bool,

        /// Send to the printer instead of showing instructions
        #[arg(long)]
        send: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// stderr logging; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<(), ShelfError> {
    let catalog = Catalog::load(&cli.catalog)?;
    let dirs = OutputDirs::new(cli.barcode_dir, cli.label_dir);
    let mut session = Session::new(&catalog, Compositor::new(dirs), platform::detect());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            writeln!(out, "Loaded {} items from {}", catalog.len(), cli.catalog.display())?;
            let stdin = io::stdin();
            menu::Menu::new(&mut session, stdin.lock(), &mut out).run()
        }
        Commands::List { json: true } => session.list_json(&mut out),
        Commands::List { json: false } => session.list_items(&mut out),
        Commands::Show { id } => session.item_details(&id, &mut out),
        Commands::Search { query } => session.search_by_name(&query, &mut out),
        Commands::Barcode { id } => session.show_barcode(&id, &mut out),
        Commands::Qr { id } => session.show_qr(&id, &mut out),
        Commands::Label { id, open } => session.make_label(&id, open, &mut out),
        Commands::Labels { category } => session.make_labels(category.as_deref(), &mut out),
        Commands::Print { id, label: true, send } => session.print_label(&id, send, &mut out),
        Commands::Print { id, label: false, send } => session.print_barcode(&id, send, &mut out),
    };

    out.flush()?;
    result
}
