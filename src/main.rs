use awot_static::config::{self, BuildConfig, CliOverrides};
use awot_static::types::SketchMode;
use awot_static::{output, pipeline, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "awot-static")]
#[command(about = "Embed static web assets in aWOT firmware")]
#[command(long_about = "\
Embed static web assets in aWOT firmware

Every file under the source directory is gzip-compressed, split into
PROGMEM-sized blocks and rendered as a handler in StaticFiles.h, together
with ServeStatic(), which registers a GET route for each file.

  static/                     sketch/
  ├── index.html      →       ├── StaticFiles.h   static_index at \"\"
  └── css/                    │                   static_css_app_css at \"css/app.css\"
      └── app.css             └── sketch.ino      (with --create-sketch wifi|ethernet)

Options are read from awot-static.toml in the working directory when
present; flags override the file. Run 'awot-static gen-config' for a
documented template.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./awot-static.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of files to embed
    #[arg(long, global = true)]
    sources: Option<PathBuf>,

    /// Glob of files or directories to skip (repeatable)
    #[arg(long, global = true)]
    exclude: Vec<String>,

    /// File served at the root URL, relative to the sources directory
    #[arg(long, global = true)]
    index_file: Option<String>,

    /// Output directory for StaticFiles.h and the sketch
    #[arg(long, global = true)]
    sketch_dir: Option<PathBuf>,

    /// Also generate a bootstrap sketch for this network transport
    #[arg(long, value_enum, global = true)]
    create_sketch: Option<SketchMode>,

    /// Log per-asset details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile all assets and write StaticFiles.h (and the sketch)
    Build,
    /// List the files that would be embedded
    Scan {
        /// Print the file list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile all assets without writing anything
    Check,
    /// Print a stock awot-static.toml with all options documented
    GenConfig,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            sources: self.sources.clone(),
            exclude: self.exclude.clone(),
            index_file: self.index_file.clone(),
            sketch_dir: self.sketch_dir.clone(),
            create_sketch: self.create_sketch,
        }
    }

    fn load_config(&self) -> Result<BuildConfig, config::ConfigError> {
        config::load_config(self.config.as_deref(), &self.overrides())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Build => {
            let build_config = cli.load_config()?;
            init_thread_pool(&build_config);
            println!(
                "==> Building {} \u{2192} {}",
                build_config.sources.display(),
                build_config.sketch_dir.display()
            );
            let report = pipeline::build(&build_config)?;
            output::print_build_output(&report.assets, &report.output);
        }
        Command::Scan { json } => {
            let build_config = cli.load_config()?;
            let files = scan::scan(&build_config.sources, &build_config.exclude)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                output::print_scan_output(&files, &build_config.sources);
            }
        }
        Command::Check => {
            let build_config = cli.load_config()?;
            init_thread_pool(&build_config);
            println!("==> Checking {}", build_config.sources.display());
            let report = pipeline::check(&build_config)?;
            output::print_check_output(&report.assets);
            println!("==> Sources are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug`, else `warn`.
fn init_logging(verbose: bool) {
    let default = if verbose { "awot_static=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(config: &BuildConfig) {
    let threads = config::effective_threads(&config.processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
