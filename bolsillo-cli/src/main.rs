use anyhow::{Context, Result, bail};
use bolsillo_core::{CategoryRegistry, ParsedCommand, RateSupplier, to_usd};
use bolsillo_parser::{AccountEntry, ParseContext, Parser as CommandParser, SegmentOutcome, format_command};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "bolsillo", version, about = "Turn Spanish money talk into transactions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a voice/text command ("gasté 10 en comida y 5 en taxi")
    Parse {
        /// The text to parse; multiple words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,

        /// Print JSON instead of confirmation lines
        #[arg(long)]
        json: bool,

        /// Treat the text as one command (no splitting on "y" / commas)
        #[arg(long)]
        single: bool,

        /// Bolívares per dollar, overriding the configured rate
        #[arg(long)]
        ves_rate: Option<f64>,
    },

    /// Manage ~/.bolsillo/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Manage the bank/wallet keywords used to detect accounts
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Subcommand, Debug)]
enum AccountsCommand {
    /// List accounts in match order
    List,
    /// Add an account or replace its keywords
    Set {
        name: String,
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Remove an account
    Remove { name: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse {
            text,
            json,
            single,
            ves_rate,
        } => {
            parse_text(&text.join(" "), json, single, ves_rate)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::Accounts { command } => match command {
            AccountsCommand::List => {
                let cfg = config::load_config()?;
                for entry in cfg.accounts.entries() {
                    println!("{}: {}", entry.name, entry.keywords.join(", "));
                }
            }
            AccountsCommand::Set { name, keywords } => {
                let mut cfg = config::load_config()?;
                cfg.accounts
                    .upsert(AccountEntry {
                        name: name.clone(),
                        keywords,
                    })
                    .with_context(|| format!("account {name}"))?;
                config::save_config(&cfg)?;
                println!("Saved account {name}");
            }
            AccountsCommand::Remove { name } => {
                let mut cfg = config::load_config()?;
                if !cfg.accounts.remove(&name) {
                    bail!("No account named {name}");
                }
                config::save_config(&cfg)?;
                println!("Removed account {name}");
            }
        },
    }

    Ok(())
}

fn parse_text(text: &str, json: bool, single: bool, ves_rate: Option<f64>) -> Result<()> {
    let cfg = config::load_config()?;
    let parser = CommandParser::new(cfg.lexicon());
    let rates = cfg.rates(ves_rate);
    let outcomes = parse_outcomes(&parser, &cfg.category_registry(), text, single);

    if json {
        let cmds: Vec<&ParsedCommand> = outcomes.iter().filter_map(SegmentOutcome::command).collect();
        println!("{}", serde_json::to_string_pretty(&cmds)?);
        return Ok(());
    }

    let mut parsed = 0usize;
    for outcome in &outcomes {
        match outcome {
            SegmentOutcome::Parsed(cmd) => {
                parsed += 1;
                println!("{}", confirmation_line(cmd, &rates));
            }
            SegmentOutcome::Unparsed { raw_text } => {
                println!("⚠️  No entendí: \"{raw_text}\"");
            }
        }
    }

    if parsed == 0 {
        bail!("No transaction found in: {text}");
    }
    Ok(())
}

fn parse_outcomes(
    parser: &CommandParser,
    registry: &impl CategoryRegistry,
    text: &str,
    single: bool,
) -> Vec<SegmentOutcome> {
    let categories = registry.categories();
    let ctx = ParseContext::default().with_categories(&categories);

    if !single {
        return parser.parse_segments(text, &ctx);
    }
    match parser.parse(text, &ctx) {
        Some(cmd) => vec![SegmentOutcome::Parsed(cmd)],
        None => vec![SegmentOutcome::Unparsed {
            raw_text: text.trim().to_string(),
        }],
    }
}

fn confirmation_line(cmd: &ParsedCommand, rates: &impl RateSupplier) -> String {
    let mut line = format!("{}  (confianza {:.2})", format_command(cmd), cmd.confidence);
    if !cmd.currency.is_dollar_pegged() {
        if let Some(usd) = to_usd(cmd.amount, cmd.currency, rates) {
            line.push_str(&format!("  ≈ {usd:.2} USD"));
        }
    }
    line
}
