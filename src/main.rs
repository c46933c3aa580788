use anyhow::Result;
use clap::{Parser, Subcommand};

use publish_gate::cli::orchestration::{self, PublishWorkflowArgs};
use publish_gate::ui;

#[derive(Parser)]
#[command(
    name = "publish-gate",
    version,
    about = "Resolve release versions and gate package publishing"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version the current checkout would be published as
    Resolve {
        #[arg(long, help = "Use this version instead of querying the status endpoint")]
        reported_version: Option<String>,
    },
    /// Check whether a version already exists in the package index
    Check {
        #[arg(long, help = "Use this version instead of querying the status endpoint")]
        reported_version: Option<String>,

        #[arg(long, help = "Check this exact version, skipping resolution")]
        version: Option<String>,
    },
    /// Resolve, check the index, then build and upload if needed
    Publish {
        #[arg(long, help = "Use this version instead of querying the status endpoint")]
        reported_version: Option<String>,

        #[arg(long, help = "Preview what would happen without running any step")]
        dry_run: bool,
    },
    /// Print the effective configuration
    ShowConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut workflow = PublishWorkflowArgs {
        config_path: args.config,
        ..PublishWorkflowArgs::default()
    };

    match args.command {
        Command::Resolve { reported_version } => {
            workflow.reported_version = reported_version;
            let resolved = orchestration::run_resolve(&workflow)?;
            println!("{}", resolved);
        }
        Command::Check {
            reported_version,
            version,
        } => {
            workflow.reported_version = reported_version;
            let result = orchestration::run_check(&workflow, version.as_deref())?;
            if result.published {
                ui::display_success(&format!(
                    "{} {} is published ({})",
                    result.package, result.version, result.url
                ));
            } else {
                ui::display_status(&format!(
                    "{} {} is not published",
                    result.package, result.version
                ));
            }
        }
        Command::Publish {
            reported_version,
            dry_run,
        } => {
            workflow.reported_version = reported_version;
            workflow.dry_run = dry_run;
            let outcome = orchestration::run_publish_workflow(&workflow)?;
            ui::display_outcome(&outcome);
        }
        Command::ShowConfig => {
            let config = orchestration::load(&workflow)?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
