use anyhow::{Context, Result, anyhow};
use character_roster::client::{RosterClient, RosterSession};
use character_roster::domain::{Character, CharacterId};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Command-line client for the character roster API")]
struct Cli {
    /// Base URL of the roster API
    #[arg(long, env = "ROSTER_API_URL", default_value = "http://127.0.0.1:3000")]
    api: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List characters, optionally filtered by name, real name or universe
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    Show {
        id: CharacterId,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        real_name: String,
        #[arg(long)]
        universe: String,
    },
    /// Edit a character; fields not given keep their current value
    Edit {
        id: CharacterId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        real_name: Option<String>,
        #[arg(long)]
        universe: Option<String>,
    },
    Delete {
        id: CharacterId,
    },
    /// Show the number of characters and distinct universes
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = RosterSession::new(RosterClient::new(cli.api));

    match cli.command {
        Command::List { search } => {
            session.refresh().await.context("failed to fetch characters")?;
            if let Some(term) = search {
                session.view_mut().search(term);
            }
            let view = session.view();
            for character in view.filtered() {
                print_character(character);
            }
            println!(
                "-- {} shown of {}, {} universes",
                view.filtered().len(),
                view.characters().len(),
                view.universe_count()
            );
        }
        Command::Show { id } => {
            let character = session
                .client()
                .get(id)
                .await
                .with_context(|| format!("failed to fetch character {id}"))?;
            println!("{}", serde_json::to_string_pretty(&character)?);
        }
        Command::Add {
            name,
            real_name,
            universe,
        } => {
            let draft = session.view_mut().begin_create();
            draft.name = name;
            draft.real_name = real_name;
            draft.universe = universe;
            let created = submit(&mut session).await?;
            println!("created #{}", created.id);
            print_character(&created);
        }
        Command::Edit {
            id,
            name,
            real_name,
            universe,
        } => {
            session.refresh().await.context("failed to fetch characters")?;
            let draft = session
                .view_mut()
                .begin_edit(id)
                .ok_or_else(|| anyhow!("character {id} not found"))?;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(real_name) = real_name {
                draft.real_name = real_name;
            }
            if let Some(universe) = universe {
                draft.universe = universe;
            }
            let updated = submit(&mut session).await?;
            println!("updated #{}", updated.id);
            print_character(&updated);
        }
        Command::Delete { id } => {
            let removed = session
                .delete(id)
                .await
                .with_context(|| format!("failed to delete character {id}"))?;
            println!("deleted #{}", removed.id);
        }
        Command::Stats => {
            session.refresh().await.context("failed to fetch characters")?;
            let view = session.view();
            println!("characters: {}", view.characters().len());
            println!("universes:  {}", view.universe_count());
        }
    }

    Ok(())
}

async fn submit(session: &mut RosterSession) -> Result<Character> {
    session
        .submit_draft()
        .await
        .context("failed to save character")?
        .ok_or_else(|| anyhow!("no draft to save"))
}

fn print_character(character: &Character) {
    println!(
        "#{:<4} {:<24} {:<24} {}",
        character.id, character.name, character.real_name, character.universe
    );
}
