use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use snapfox_cli::{BrowserChoice, commands};
use snapfox_core::target::{DEFAULT_OUTPUT, DEFAULT_URL};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snapfox")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Capture screenshots of web pages with a headless browser",
    long_about = "Snapfox launches a browser (Firefox by default), opens a page, navigates \
                  to a URL, captures a screenshot to a file, and shuts the browser down."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate to a URL and capture a screenshot
    Shot {
        /// URL to capture (https:// is assumed when no scheme is given)
        #[arg(value_name = "URL", default_value = DEFAULT_URL)]
        url: String,

        /// Output file for the screenshot
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Browser engine variant to drive
        #[arg(long, value_enum, default_value = "firefox")]
        browser: BrowserChoice,

        /// Path to the browser binary (skips the default search)
        #[arg(long, value_name = "PATH")]
        browser_path: Option<PathBuf>,

        /// Use a named persistent profile instead of a throwaway one
        #[arg(long)]
        profile: Option<String>,

        /// Run with a visible browser window
        #[arg(long)]
        headful: bool,

        /// Navigation timeout in seconds
        #[arg(long, value_name = "SECS", default_value_t = 30)]
        timeout: u64,

        /// Print the capture report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        long_about = "Generate shell completion scripts for snapfox.\n\n\
                      SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
                      INSTALLATION:\n  \
                      bash: snapfox completion --shell bash >> ~/.bashrc\n  \
                      zsh:  snapfox completion --shell zsh >> ~/.zshrc\n  \
                      fish: snapfox completion --shell fish > ~/.config/fish/completions/snapfox.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Shot {
            url,
            output,
            browser,
            browser_path,
            profile,
            headful,
            timeout,
            json,
        } => commands::shot::execute(
            &url,
            &output,
            browser.kind(),
            browser_path,
            profile,
            !headful,
            timeout,
            json,
        ),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("snapfox=debug,snapfox_core=debug,snapfox_browser=debug")
    } else {
        EnvFilter::new("snapfox=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
