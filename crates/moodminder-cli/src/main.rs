use clap::{Parser, Subcommand};
use eyre::Result;
use moodminder_assessment::MoodAssessor;
use moodminder_assessment::config::AssessmentConfig;
use moodminder_cli::commands::{self, AssessArgs, ConfigInitArgs};
use moodminder_storage::HistoryStore;
use moodminder_storage::history::DEFAULT_HISTORY_DAYS;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "moodminder",
    about = "Score mood questionnaires and track assessment history",
    version
)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the question catalog, or a random sample of it
    Questions {
        /// Number of random questions to draw
        #[arg(long)]
        count: Option<usize>,
    },
    /// Analyze a set of questionnaire responses
    Assess(AssessArgs),
    /// Print a user's recent assessments
    History {
        /// User whose history to read
        #[arg(long)]
        user: String,
        /// How many days back to look
        #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
        days: u32,
    },
    /// Load or train the learned classifier ahead of first use
    Train,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file
    Init(ConfigInitArgs),
    /// Print the config in effect
    Show,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let mut out = std::io::stdout().lock();
    let assessor = || -> Result<MoodAssessor> {
        let config = AssessmentConfig::from_env()?;
        Ok(MoodAssessor::new(&config)?)
    };

    match cli.command {
        Command::Questions { count } => commands::questions(&assessor()?, count, &mut out),
        Command::Assess(args) => {
            let store = match &args.user {
                Some(_) => Some(HistoryStore::new(commands::data_dir()?)),
                None => None,
            };
            commands::assess(&assessor()?, store.as_ref(), &args, &mut out)
        }
        Command::History { user, days } => {
            let store = HistoryStore::new(commands::data_dir()?);
            commands::history(&store, &user, days, &mut out)
        }
        Command::Train => commands::train(&assessor()?, &mut out),
        Command::Config {
            command: ConfigCommand::Init(args),
        } => commands::config_init(&args, &mut out),
        Command::Config {
            command: ConfigCommand::Show,
        } => commands::config_show(&AssessmentConfig::from_env()?, &mut out),
    }
}
