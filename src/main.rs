use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use fieldguard::profile::{EMAIL, USERNAME};
use fieldguard::{DirectoryConfig, ProfileDirectory, UserProfile, Value};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fieldguard")]
#[command(about = "Validated profile fields and a weak-reference profile cache")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldName {
    Username,
    Email,
}

impl FieldName {
    fn as_str(self) -> &'static str {
        match self {
            Self::Username => USERNAME,
            Self::Email => EMAIL,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Check a candidate value against a profile field rule
    Validate {
        #[arg(long, value_enum)]
        field: FieldName,
        value: String,
    },
    /// Build a profile, cache it, then drop it and watch the entry vanish
    Demo {
        #[arg(long, default_value = "alice")]
        username: String,
        #[arg(long, default_value = "alice@example.com")]
        email: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate { field, value } => validate(field, &value),
        Command::Demo { username, email } => demo(&username, &email),
    }
}

fn validate(field: FieldName, value: &str) -> Result<()> {
    let registry = UserProfile::field_registry();
    let rule = registry.field(field.as_str())?;

    if rule.check(&Value::from(value)) {
        println!("accepted: {} = {:?}", field.as_str(), value);
        Ok(())
    } else {
        Err(anyhow!("rejected: {} = {:?}", field.as_str(), value))
    }
}

fn demo(username: &str, email: &str) -> Result<()> {
    let config = DirectoryConfig::from_env().map_err(|e| anyhow!(e))?;
    let mut directory = ProfileDirectory::with_config(config);

    let profile = UserProfile::with_identity(username, email)
        .context("invalid profile input")?
        .into_shared();
    profile.borrow_mut().touch_login();

    let id = directory.add_to_cache(&profile)?;
    info!(profile_id = %id, live = directory.live_count(), "profile cached");

    let snapshot = profile.borrow().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    drop(profile);

    let still_cached = directory.get_from_cache(id)?.is_some();
    info!(
        profile_id = %id,
        still_cached,
        live = directory.live_count(),
        "dropped last profile handle"
    );
    println!("cached after drop: {}", still_cached);

    Ok(())
}
