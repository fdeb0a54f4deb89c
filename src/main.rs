use clap::{Args as ClapArgs, Parser, Subcommand};
use cloneview::{Config, ViewerError};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cloneview")]
#[command(author, version, about = "Local web viewer for code clone detection reports")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the viewer web UI
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Port to listen on (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the precomputed JSON artifacts
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Don't open the browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// List the source files the viewer would serve, one per line
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct SourceArgs {
    /// Path to config.json
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Source root to scan (overrides config file; config.json not required)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Source file extension to recognize, without the dot
    #[arg(long)]
    extension: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Serve { source, port, data_dir, no_open } => {
            let mut config = load_config(&source);
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_directory = data_dir;
            }

            if let Err(e) = cloneview::serve::start(config, !no_open) {
                eprintln!("Server error: {}", e);
                std::process::exit(1);
            }
        }

        Command::List { source } => {
            let config = load_config(&source);
            match cloneview::scan::enumerate(&config.source_directory, &config.source_extension) {
                Ok(mut files) => {
                    files.sort();
                    for f in files {
                        println!("{}", f);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Build the effective config: `--root` alone works without a config file,
/// otherwise `config.json` is required.
fn load_config(source: &SourceArgs) -> Config {
    let loaded = match &source.root {
        Some(root) => Config::for_root(root),
        None => Config::load(&source.config),
    };

    let mut config = match loaded {
        Ok(c) => c,
        Err(ViewerError::Access { path, source }) => {
            eprintln!("Cannot read {}: {}", path, source);
            eprintln!("Pass --root <DIR> or point --config at a config.json.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(ext) = &source.extension {
        config.source_extension = ext.trim_start_matches('.').to_string();
    }
    config
}
