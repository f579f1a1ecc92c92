//! # Rasid CLI
//!
//! Command-line interface for invoice printing.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP print listener
//! RASID_SECRET=s3cret rasid listen "EPSON TM-T82"
//!
//! # Send a prepared command file to the printer
//! rasid print "EPSON TM-T82" output.bin
//!
//! # Encode the demo invoice to output.bin
//! rasid generate
//!
//! # Encode an invoice file and print it
//! rasid generate --invoice invoice.json --printer /dev/usb/lp0
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use rasid::{
    Invoice, RasidError,
    delivery::{DEFAULT_JOB_NAME, Deliverer, DeliveryConfig, DeliveryReport, SerializationMode},
    receipt::{self, ShopProfile},
    server::{self, DEFAULT_PORT, ServerConfig},
    spooler::SystemSpooler,
};

/// Rasid - ESC/POS invoice printer utility
#[derive(Parser, Debug)]
#[command(name = "rasid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Accept print jobs over HTTP and print them
    Listen {
        /// Printer name (or device path on non-Windows systems)
        printer: String,

        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Shared secret clients must send as `secret_key`
        #[arg(long, env = "RASID_SECRET", hide_env_values = true)]
        secret: String,

        /// Shop profile JSON (defaults to the built-in shop)
        #[arg(long, value_name = "FILE")]
        shop: Option<PathBuf>,

        /// Also save every encoded job to this file
        #[arg(long, value_name = "FILE")]
        outfile: Option<PathBuf>,

        /// Serialize jobs across all printers instead of per printer
        #[arg(long)]
        global_lock: bool,

        /// Spooler document name
        #[arg(long, default_value = DEFAULT_JOB_NAME)]
        job_name: String,
    },

    /// Send a file to the printer as raw bytes
    Print {
        /// Printer name (or device path on non-Windows systems)
        printer: String,

        /// File to send verbatim
        file: PathBuf,

        /// Spooler document name
        #[arg(long, default_value = DEFAULT_JOB_NAME)]
        job_name: String,
    },

    /// Encode an invoice to a command file
    Generate {
        /// Invoice JSON (omit for the demo invoice dated today)
        #[arg(long, value_name = "FILE")]
        invoice: Option<PathBuf>,

        /// Where to write the encoded bytes
        #[arg(long, value_name = "FILE", default_value = "output.bin")]
        outfile: PathBuf,

        /// Shop profile JSON (defaults to the built-in shop)
        #[arg(long, value_name = "FILE")]
        shop: Option<PathBuf>,

        /// Also print the result on this printer
        #[arg(long)]
        printer: Option<String>,

        /// Spooler document name
        #[arg(long, default_value = DEFAULT_JOB_NAME)]
        job_name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rasid=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RasidError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Listen {
            printer,
            port,
            host,
            secret,
            shop,
            outfile,
            global_lock,
            job_name,
        } => {
            if secret.is_empty() {
                return Err(RasidError::Config("secret must not be empty".to_string()));
            }
            let profile = load_profile(shop.as_deref())?;
            let config = DeliveryConfig {
                printer,
                job_name,
                output_path: outfile,
                serialization: if global_lock {
                    SerializationMode::Global
                } else {
                    SerializationMode::PerTarget
                },
            };
            let server_config = ServerConfig {
                listen_addr: format!("{}:{}", host, port),
                secret_key: secret,
            };
            let deliverer = Deliverer::new(SystemSpooler::default(), config);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(server_config, deliverer, profile))
        }

        Commands::Print {
            printer,
            file,
            job_name,
        } => {
            let config = DeliveryConfig {
                job_name,
                ..DeliveryConfig::new(printer)
            };
            let report = Deliverer::new(SystemSpooler::default(), config).deliver_file(&file)?;
            print_report(&report, &file.display().to_string());
            Ok(())
        }

        Commands::Generate {
            invoice,
            outfile,
            shop,
            printer,
            job_name,
        } => {
            let profile = load_profile(shop.as_deref())?;
            let invoice = match invoice {
                Some(path) => load_invoice(&path)?,
                None => receipt::sample_invoice(receipt::current_date()),
            };

            let buffer = receipt::encode(&invoice, &profile);
            buffer.write_to(&outfile)?;
            println!(
                "Invoice {} encoded: {} bytes written to {}",
                invoice.id,
                buffer.len(),
                outfile.display()
            );

            if let Some(printer) = printer {
                let config = DeliveryConfig {
                    job_name,
                    ..DeliveryConfig::new(printer)
                };
                let report = Deliverer::new(SystemSpooler::default(), config).deliver(&buffer)?;
                print_report(&report, &format!("invoice {}", invoice.id));
            }
            Ok(())
        }
    }
}

fn load_profile(path: Option<&Path>) -> Result<ShopProfile, RasidError> {
    match path {
        Some(path) => {
            let profile = ShopProfile::from_json_file(path)?;
            info!(shop = %profile.name, path = %path.display(), "loaded shop profile");
            Ok(profile)
        }
        None => Ok(ShopProfile::default()),
    }
}

fn load_invoice(path: &Path) -> Result<Invoice, RasidError> {
    let data = fs::read(path).map_err(|e| {
        RasidError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_slice(&data)?)
}

fn print_report(report: &DeliveryReport, what: &str) {
    println!("Printed {}: {} bytes", what, report.bytes_written);
    if !report.teardown_warnings.is_empty() {
        println!(
            "  {} cleanup step(s) failed after the job was accepted",
            report.teardown_warnings.len()
        );
    }
}
