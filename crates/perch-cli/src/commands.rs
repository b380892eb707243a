use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use perch_brain::BrainStore;
use perch_config::{ConfigLoader, PerchConfig};
use perch_core::{PerchError, Result, RoomRef, SkillContext, UserRef};
use perch_skills::builtin_registry;

use crate::console::{ConfigSecrets, ConsoleRooms, StdoutSink};

/// Perch — chat-ops bot skill runtime
#[derive(Parser)]
#[command(name = "perch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to perch.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a skill the way the bot would, printing replies to stdout
    Run {
        /// Skill name, e.g. "hello" or "404-finder"
        skill: String,
        /// Arguments passed to the skill, joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List registered skills
    Skills,
    /// Show the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show brain entries stored under a scope (usually a skill name)
    Brain {
        /// The scope to inspect
        scope: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let loader = ConfigLoader::load(self.config.as_deref())?;
        let config = loader.get();
        init_tracing(&config, self.log_level.as_deref());

        match self.command {
            Commands::Run { skill, args } => run_skill(&config, &skill, &args.join(" ")).await,
            Commands::Skills => {
                println!("{}", builtin_registry().help_block());
                Ok(())
            }
            Commands::Config { json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                } else {
                    let rendered = toml::to_string_pretty(&config)
                        .map_err(|e| PerchError::Config(e.to_string()))?;
                    println!("{rendered}");
                }
                Ok(())
            }
            Commands::Brain { scope } => {
                let store = BrainStore::open(&config.brain.db_path)?;
                let keys = store.keys(&scope)?;
                if keys.is_empty() {
                    println!("(no entries under scope '{scope}')");
                }
                for key in keys {
                    let value = store.get(&scope, &key)?.unwrap_or_default();
                    println!("{key} = {value}");
                }
                Ok(())
            }
        }
    }
}

async fn run_skill(config: &PerchConfig, skill_name: &str, raw_args: &str) -> Result<()> {
    let registry = builtin_registry();
    let Some(skill) = registry.get(skill_name) else {
        return Err(PerchError::SkillNotFound(format!(
            "{skill_name} (try `perch skills`)"
        )));
    };

    let store = BrainStore::open(&config.brain.db_path)?;
    let http = reqwest::Client::builder()
        .user_agent(&config.http.user_agent)
        .build()
        .map_err(|e| PerchError::Config(format!("failed to build http client: {e}")))?;

    // The brain is scoped per skill; keys embed user/room identity where a
    // skill needs finer grain, matching how the skills build their keys.
    let console_user = config.bot.console_user.as_str();
    let console_room = config.bot.console_room.as_str();
    let user = UserRef::new(console_user, console_user);
    let room = RoomRef::new(console_room, console_room);

    let ctx = SkillContext::new(
        config.bot.name.as_str(),
        user,
        room,
        Arc::new(StdoutSink),
        Arc::new(store.scoped(skill_name)),
        Arc::new(ConfigSecrets::new(config.secrets.clone())),
        Arc::new(ConsoleRooms),
    )
    .with_skill_name(skill_name)
    .with_services(config.services.endpoints())
    .with_http(http)
    .with_arguments(raw_args);

    debug!(skill = skill_name, args = raw_args, "invoking skill");
    skill.execute(&ctx).await
}

fn init_tracing(config: &PerchConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(&config.logging.level);
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A second init (tests) is harmless; ignore the error.
    if config.logging.format == "compact" {
        let _ = builder.compact().try_init();
    } else {
        let _ = builder.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_args_join_like_a_chat_line() {
        let cli = Cli::parse_from(["perch", "run", "room", "topic", "#ops", "ship", "it"]);
        match cli.command {
            Commands::Run { skill, args } => {
                assert_eq!(skill, "room");
                assert_eq!(args.join(" "), "topic #ops ship it");
            }
            _ => panic!("expected run command"),
        }
    }

    #[tokio::test]
    async fn unknown_skill_is_an_error() {
        let mut config = PerchConfig::default();
        let dir = tempfile::tempdir().unwrap();
        config.brain.db_path = dir.path().join("brain.db");

        let err = run_skill(&config, "no-such-skill", "").await.unwrap_err();
        assert!(matches!(err, PerchError::SkillNotFound(_)));
    }
}
