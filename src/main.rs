mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use passgen::{Options, copy_to_clipboard, generate};

#[derive(Parser)]
#[command(
    name = "passgen",
    version,
    about = "Random password generator with configurable character pools"
)]
struct Cli {
    /// Password length
    #[arg(short, long, default_value_t = passgen::pool::DEFAULT_LENGTH, allow_negative_numbers = true)]
    length: i64,

    /// Allowed special characters (replaces the defaults)
    #[arg(short, long, default_value = "")]
    special: String,

    /// Exclude uppercase letters
    #[arg(long)]
    no_upper: bool,

    /// Exclude digits
    #[arg(long)]
    no_digits: bool,

    /// Exclude special characters
    #[arg(long)]
    no_special: bool,

    /// Exclude ambiguous characters (0OIl1)
    #[arg(long)]
    no_ambiguous: bool,

    /// Also copy the password to the system clipboard
    #[arg(short, long)]
    copy: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            length: self.length,
            no_upper: self.no_upper,
            no_digits: self.no_digits,
            no_special: self.no_special,
            special: self.special.clone(),
            no_ambiguous: self.no_ambiguous,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, display: &ui::DisplayOptions) -> Result<()> {
    let password = generate(&cli.options()).context("Failed to generate password")?;

    ui::display_password(&password)?;

    if cli.copy {
        let tool = copy_to_clipboard(&password).context("Failed to copy to clipboard")?;
        log::info!("copied {} chars with {}", password.chars().count(), tool);
        ui::display_copied(tool, display)?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let display = ui::DisplayOptions::detect();

    if let Err(err) = run(&cli, &display) {
        ui::display_error(&err, &display);
        std::process::exit(1);
    }
}
