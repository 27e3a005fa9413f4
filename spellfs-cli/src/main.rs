//! SpellFS CLI - Spellcross asset archive tool
//!
//! Lists, extracts, verifies and builds `.FS` archives, and packs or unpacks
//! loose `.LZ` / `.LZ0` streams.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spellfs")]
#[command(
    author,
    version,
    about = "Spellcross FS archive and LZ stream tool"
)]
#[command(long_about = "
SpellFS reads and writes the .FS asset containers of Spellcross and the
game's LZ compression (.LZ / .LZ0 members, possibly packed several times).

Examples:
  spellfs list COMMON.FS
  spellfs list COMMON.FS -p \"*.LZ\" -v
  spellfs extract COMMON.FS -o assets --delz
  spellfs cat TEXTS.FS BRIEF01.TXT
  spellfs test COMMON.FS
  spellfs extract DATA/ -o assets --skip-existing
  spellfs delz TERRAIN.LZ -o TERRAIN.BIN
  spellfs delz unpacked/ --skip-existing
  spellfs mklz TERRAIN.BIN -o TERRAIN.LZ
  spellfs create MOD.FS A.TXT B.LZ
")]
struct Cli {
    /// Print debug logs to stderr (RUST_LOG overrides)
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entries of an FS archive
    #[command(alias = "l")]
    List {
        /// FS archive to list
        archive: PathBuf,

        /// Wildcard filter (*, ?, [...]), case-insensitive
        #[arg(short, long, default_value = "*")]
        pattern: String,

        /// Show offsets and stored sizes
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show a summary of an FS archive
    #[command(alias = "i")]
    Info {
        /// FS archive to inspect
        archive: PathBuf,
    },

    /// Extract every entry into <output>/<archive name>/
    #[command(alias = "x")]
    Extract {
        /// FS archives or folders containing them
        #[arg(required = true)]
        archives: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Keep files that already exist
        #[arg(short, long)]
        skip_existing: bool,

        /// Unpack .LZ and .LZ0 entries
        #[arg(long)]
        delz: bool,

        /// Maximum decode passes per packed entry
        #[arg(long, default_value_t = spellfs_archive::MAX_NESTED_DEPTH)]
        depth: usize,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Print one entry as text
    Cat {
        /// FS archive to read from
        archive: PathBuf,

        /// Entry name (case-insensitive)
        name: String,

        /// Unpack .LZ and .LZ0 entries
        #[arg(long)]
        delz: bool,

        /// Text encoding label
        #[arg(short, long, default_value = "windows-1250")]
        encoding: String,
    },

    /// Load every entry and report failures
    #[command(alias = "t")]
    Test {
        /// FS archive to test
        archive: PathBuf,

        /// Report every entry
        #[arg(short, long)]
        verbose: bool,
    },

    /// Unpack loose LZ streams (nested layers included)
    Delz {
        /// Packed files, or folders searched for .LZ/.LZ0/.LZW
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory (one file: stdout if omitted; batch:
        /// next to each input if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum decode passes
        #[arg(long, default_value_t = spellfs_archive::MAX_NESTED_DEPTH)]
        depth: usize,

        /// Accept streams without the end marker
        #[arg(long)]
        lenient: bool,

        /// Keep outputs that already exist and are not empty
        #[arg(short, long)]
        skip_existing: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Pack files into LZ streams
    Mklz {
        /// Input files, or folders whose unpacked files are all packed
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory (default: <input>.LZ next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of times to pack
        #[arg(short, long, default_value_t = 1)]
        layers: usize,
    },

    /// Create a new FS archive
    #[command(alias = "c")]
    Create {
        /// Output archive file
        archive: PathBuf,

        /// Files to add, stored under their file names
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = match cli.command {
        Commands::List {
            archive,
            pattern,
            verbose,
            json,
        } => commands::cmd_list(&archive, &pattern, verbose, json),
        Commands::Info { archive } => commands::cmd_info(&archive),
        Commands::Extract {
            archives,
            output,
            skip_existing,
            delz,
            depth,
            no_progress,
        } => commands::cmd_extract(
            &archives,
            &commands::ExtractOptions {
                output,
                skip_existing,
                delz,
                depth,
                progress: !no_progress,
            },
        ),
        Commands::Cat {
            archive,
            name,
            delz,
            encoding,
        } => commands::cmd_cat(&archive, &name, delz, &encoding),
        Commands::Test { archive, verbose } => commands::cmd_test(&archive, verbose),
        Commands::Delz {
            inputs,
            output,
            depth,
            lenient,
            skip_existing,
            no_progress,
        } => commands::cmd_delz(
            &inputs,
            &commands::DelzOptions {
                output,
                depth,
                lenient,
                skip_existing,
                progress: !no_progress,
            },
        ),
        Commands::Mklz {
            inputs,
            output,
            layers,
        } => commands::cmd_mklz(&inputs, output.as_deref(), layers),
        Commands::Create {
            archive,
            files,
            verbose,
        } => commands::cmd_create(&archive, &files, verbose),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "spellfs", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
