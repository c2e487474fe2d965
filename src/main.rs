use anyhow::Result;
use clap::Parser;

use git_mkversion::cli::{run_version_workflow, VersionWorkflowArgs};
use git_mkversion::{config, telemetry, ui};

#[derive(clap::Parser)]
#[command(
    name = "mkversion",
    about = "Compute the next release version from git tags and series branches"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'C', long, help = "Repository to inspect (default: current directory)")]
    repo: Option<String>,

    #[arg(short, long, help = "Use this tracking branch instead of the checkout's upstream")]
    branch: Option<String>,

    #[arg(long, help = "File with `git tag --list` output (offline mode)")]
    tags_file: Option<String>,

    #[arg(long, help = "File with `git branch --all` output (offline mode)")]
    branches_file: Option<String>,

    #[arg(long, help = "Pad the version to four components")]
    pad: bool,

    #[arg(long, help = "Show the active branch on stderr")]
    show_branch: bool,

    #[arg(long, help = "Exit with status 2 when the version is unknown")]
    strict: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init(args.verbose);

    if args.version {
        println!("mkversion {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = VersionWorkflowArgs {
        repo_path: args.repo,
        branch: args.branch,
        tags_file: args.tags_file,
        branches_file: args.branches_file,
        pad: args.pad,
    };

    let result = match run_version_workflow(&workflow_args, &config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    if args.show_branch {
        ui::display_active_branch(&result.computed);
    }

    ui::display_version(&result.version);

    if args.strict && result.computed.is_unknown() {
        std::process::exit(2);
    }

    Ok(())
}
