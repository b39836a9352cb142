//! cgmes-assembling CLI - inspect and record file tracking state, query the boundary service

use cgmes_assembling::config::{self, AssemblingConfig};
use cgmes_assembling::ui::{self, Icons};
use cgmes_assembling::{BoundaryClient, TrackingStore};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "cgmes-assembling")]
#[command(version)]
#[command(about = "File tracking and boundary resolution for CGMES model assembling")]
#[command(long_about = r#"
Keeps track of the CGMES files handled by the assembling pipeline, per origin,
and queries the boundary service for the boundary files needed to assemble them.

Example usage:
  cgmes-assembling init
  cgmes-assembling status --filename 20200301T1230Z_1D_RTEFRANCE-FR_SV_001.zip --origin RTE
  cgmes-assembling depends --uuid sv-uuid tp-uuid ssh-uuid
  cgmes-assembling boundary --id urn:uuid:3e3f8e4a --out eqbd.xml
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Show the tracking state of a file
    Status {
        #[arg(short, long)]
        filename: String,

        #[arg(short, long)]
        origin: String,
    },

    /// Record a file as available (handled) under an identifier
    Available {
        #[arg(short, long)]
        filename: String,

        #[arg(short, long)]
        uuid: String,

        #[arg(short, long)]
        origin: String,
    },

    /// Record a file as imported
    Imported {
        #[arg(short, long)]
        filename: String,

        #[arg(short, long)]
        origin: String,
    },

    /// Replace the dependency list of a file
    Depends {
        #[arg(short, long)]
        uuid: String,

        /// Identifiers of the files it depends on
        dependencies: Vec<String>,
    },

    /// Show the dependency list of a file
    Dependencies {
        #[arg(short, long)]
        uuid: String,
    },

    /// Show row counts of the tracking tables
    Stats,

    /// Fetch one boundary file
    Boundary {
        #[arg(short, long)]
        id: String,

        /// Write the boundary content to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the latest boundary files
    Boundaries,

    /// List the known TSOs
    Tsos,

    /// List the known business processes
    BusinessProcesses,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let settings = config::load_config(Some(&config_path))?.unwrap_or_default();

    match cli.command {
        Commands::Init { force } => {
            config::write_config(&config_path, &AssemblingConfig::default(), force)?;
            ui::success(&format!("Configuration written to {}", config_path.display()));
        }

        Commands::Status { filename, origin } => {
            let store = open_store(&settings)?;
            ui::header(Icons::FILE, &format!("{} ({})", filename, origin));

            let handled = store.get_handled_date(&filename, &origin)?;
            let imported = store.get_import_date(&filename, &origin)?;
            let uuid = store.get_uuid_by_filename(&filename, &origin)?;

            let handled = handled.map(|d| d.to_rfc3339());
            let imported = imported.map(|d| d.to_rfc3339());
            ui::state("Handled", handled.as_deref(), "never seen");
            ui::state("Imported", imported.as_deref(), "not imported");
            ui::state("Uuid", uuid.as_deref(), "not registered");
            if let Some(uuid) = uuid {
                let deps = store.get_dependencies(&uuid)?.map(|deps| format!("{:?}", deps));
                ui::state("Dependencies", deps.as_deref(), "not recorded");
            }
            store.close()?;
        }

        Commands::Available { filename, uuid, origin } => {
            let store = open_store(&settings)?;
            store.log_file_available(&filename, &uuid, &origin, Utc::now())?;
            store.close()?;
            ui::success(&format!("{} from {} recorded as available ({})", filename, origin, uuid));
        }

        Commands::Imported { filename, origin } => {
            let store = open_store(&settings)?;
            store.log_file_imported(&filename, &origin, Utc::now())?;
            store.close()?;
            ui::success(&format!("{} from {} recorded as imported", filename, origin));
        }

        Commands::Depends { uuid, dependencies } => {
            let store = open_store(&settings)?;
            store.log_file_dependencies(&uuid, &dependencies)?;
            store.close()?;
            ui::success(&format!("{} {} now depends on {} file(s)", Icons::LINK, uuid, dependencies.len()));
        }

        Commands::Dependencies { uuid } => {
            let store = open_store(&settings)?;
            match store.get_dependencies(&uuid)? {
                Some(deps) if deps.is_empty() => ui::info(&uuid, "no dependencies"),
                Some(deps) => {
                    ui::section(&format!(" {} ", uuid));
                    for dep in deps {
                        println!("  {} {}", Icons::LINK, dep);
                    }
                }
                None => ui::warn(&format!("No dependency row recorded for {}", uuid)),
            }
            store.close()?;
        }

        Commands::Stats => {
            let store = open_store(&settings)?;
            let stats = store.stats()?;
            store.close()?;

            ui::header(Icons::STATS, &format!("Tracking statistics ({})", settings.database.display()));
            println!("{}", ui::stats_table(&stats));
        }

        Commands::Boundary { id, out } => {
            let client = boundary_client(&settings)?;
            let Some(boundary) = client.get_boundary(&id) else {
                anyhow::bail!("boundary {} is not available from {}", id, client.service_url());
            };

            ui::info("Filename", &boundary.filename);
            ui::info("Size", &ui::human_bytes(boundary.len()));
            if let Some(out) = out {
                std::fs::write(&out, &boundary.boundary)?;
                ui::success(&format!("Boundary written to {}", out.display()));
            }
        }

        Commands::Boundaries => {
            let client = boundary_client(&settings)?;
            let boundaries = client.get_last_boundaries();
            if boundaries.is_empty() {
                ui::warn("No boundary available");
            }
            for boundary in boundaries {
                println!(
                    "{} {} [{}] {}",
                    Icons::FILE,
                    boundary.filename,
                    boundary.id,
                    ui::human_bytes(boundary.len())
                );
            }
        }

        Commands::Tsos => {
            let client = boundary_client(&settings)?;
            print_sorted("TSOs", client.get_tsos_list());
        }

        Commands::BusinessProcesses => {
            let client = boundary_client(&settings)?;
            print_sorted("Business processes", client.get_business_processes_list());
        }
    }

    Ok(())
}

fn open_store(settings: &AssemblingConfig) -> anyhow::Result<TrackingStore> {
    config::ensure_db_dir(&settings.database)?;
    tracing::debug!("Opening tracking store {:?}", settings.database);
    Ok(TrackingStore::connect_with_timeout(&settings.database, settings.busy_timeout())?)
}

fn boundary_client(settings: &AssemblingConfig) -> anyhow::Result<BoundaryClient> {
    ui::header(Icons::GLOBE, &settings.boundary_service_url);
    Ok(BoundaryClient::with_timeout(&settings.boundary_service_url, settings.request_timeout())?)
}

fn print_sorted(title: &str, values: std::collections::HashSet<String>) {
    if values.is_empty() {
        ui::warn(&format!("No {} available", title.to_lowercase()));
        return;
    }
    let mut values: Vec<String> = values.into_iter().collect();
    values.sort();
    ui::section(&format!(" {} ", title));
    for value in values {
        println!("  {}", value);
    }
}
