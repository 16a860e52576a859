use clap::{Parser, Subcommand};
use std::process;

use lectio::api::ApiClient;
use lectio::config::{self, LectioConfig};
use lectio::daily::{DateToken, ReadingPlan};
use lectio::errors::{LectioError, Result};
use lectio::passage::Passage;
use lectio::reference::VerseReference;
use lectio::types::{AnnotationTarget, ReactionAction};

/// Daily Scripture reading companion.
#[derive(Parser)]
#[command(name = "lectio", version, about = "Daily Scripture reading companion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the passage for a reading day
    Show {
        /// Reading day as MM-DD (default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Parse a verse reference and print its canonical form
    Parse {
        /// Reference string, e.g. "Lk 2,5-8"
        reference: String,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Find the verses a reference covers in a reading day's passage
    Locate {
        /// Reference string, e.g. "Lk 2,5-8"
        reference: String,
        /// Reading day as MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Highlight an excerpt of a reading day's passage
    Highlight {
        /// Reading day as MM-DD
        date: String,
        /// Excerpt to highlight, as it appears in the passage text
        #[arg(short, long)]
        text: String,
        /// Highlight color (default: from config)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Comment on a reading day
    Comment {
        /// Reading day as MM-DD
        date: String,
        /// Comment text
        content: String,
        /// Verse reference the comment refers to
        #[arg(short, long)]
        reference: Option<String>,
    },
    /// Edit an existing comment
    EditComment {
        id: u64,
        /// New comment text
        content: String,
    },
    /// Reply to a comment
    Reply {
        comment_id: u64,
        /// Reply text
        content: String,
    },
    /// Delete a comment, highlight, or reply
    Delete {
        /// What to delete: comment, highlight, or reply
        kind: String,
        id: u64,
    },
    /// Toggle a reaction on a comment or highlight
    React {
        /// Target kind: comment or highlight
        target: String,
        id: u64,
    },
    /// Set whether a comment or highlight is private
    Privacy {
        /// Target kind: comment or highlight
        target: String,
        id: u64,
        /// Make the item private (omit to make it public)
        #[arg(long)]
        private: bool,
    },
    /// Mark a reading day as read or unread
    MarkRead {
        /// Reading day as MM-DD (default: today)
        date: Option<String>,
        /// Mark as unread instead
        #[arg(long)]
        unread: bool,
    },
    /// Show or update client preferences
    Config {
        /// Set the preferred translation
        #[arg(long)]
        translation: Option<String>,
        /// Set the annotation server URL
        #[arg(long)]
        server: Option<String>,
    },
}

fn main() {
    // Log to stderr so command output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lectio=info".parse().expect("valid tracing directive")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show { date, json } => {
            let config = config::load_config()?;
            let date = resolve_date(date)?;
            let passage = day_passage(&config, &date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(passage.verses())?);
            } else {
                println!("Reading for {}", date);
                for verse in passage.verses() {
                    println!("[{}] {}", verse.reference, verse.text);
                }
            }
        }
        Commands::Parse { reference, json } => match VerseReference::parse(&reference) {
            Some(parsed) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&parsed)?);
                } else {
                    println!("{}", parsed);
                    println!("  book:    {}", parsed.book);
                    match parsed.end_chapter {
                        Some(end_chapter) => println!(
                            "  range:   chapter {} verse {} to chapter {} verse {}",
                            parsed.chapter, parsed.start_verse, end_chapter, parsed.end_verse
                        ),
                        None if parsed.is_single() => println!(
                            "  verse:   chapter {} verse {}",
                            parsed.chapter, parsed.start_verse
                        ),
                        None => println!(
                            "  range:   chapter {} verses {} to {}",
                            parsed.chapter, parsed.start_verse, parsed.end_verse
                        ),
                    }
                }
            }
            None => println!("Not a verse reference: '{}'", reference),
        },
        Commands::Locate { reference, date } => {
            let Some(parsed) = VerseReference::parse(&reference) else {
                println!("Not a verse reference: '{}'", reference);
                return Ok(());
            };
            let config = config::load_config()?;
            let date = resolve_date(date)?;
            let passage = day_passage(&config, &date)?;
            let matches = passage.find_elements(&parsed);
            if matches.is_empty() {
                println!("No verses matching '{}' in the reading for {}", parsed, date);
            } else {
                for verse in matches {
                    println!("[{}] {}", verse.reference, verse.text);
                }
            }
        }
        Commands::Highlight { date, text, color } => {
            let config = config::load_config()?;
            let date = parse_date(&date)?;
            let passage = day_passage(&config, &date)?;
            let Some(selection) = passage.select_text(&text) else {
                println!("Excerpt not found in the passage, or too short to highlight");
                return Ok(());
            };
            let Some(reference) = passage.resolve_selection(&selection) else {
                println!("Selection does not touch any verse");
                return Ok(());
            };
            let reference_string = reference.to_string();
            let color = color.as_deref().unwrap_or(&config.highlight_color);
            let client = ApiClient::new(&config);
            let saved = client.add_highlight(
                &date,
                &selection.text,
                Some(reference_string.as_str()),
                color,
            )?;
            println!(
                "Highlighted {} (id {}): \"{}\"",
                reference_string,
                saved.id,
                selection.display_excerpt()
            );
        }
        Commands::Comment {
            date,
            content,
            reference,
        } => {
            let config = config::load_config()?;
            let date = parse_date(&date)?;
            let client = ApiClient::new(&config);
            let saved = client.add_comment(&date, &content, reference.as_deref())?;
            println!("Comment saved for {} (id {})", date, saved.id);
        }
        Commands::EditComment { id, content } => {
            let config = config::load_config()?;
            let client = ApiClient::new(&config);
            client.update_comment(id, &content)?;
            println!("Comment {} updated", id);
        }
        Commands::Reply {
            comment_id,
            content,
        } => {
            let config = config::load_config()?;
            let client = ApiClient::new(&config);
            let saved = client.add_reply(comment_id, &content)?;
            println!("Reply saved under comment {} (id {})", comment_id, saved.id);
        }
        Commands::Delete { kind, id } => {
            let config = config::load_config()?;
            let client = ApiClient::new(&config);
            match kind.as_str() {
                "comment" => client.delete_comment(id)?,
                "highlight" => client.delete_highlight(id)?,
                "reply" => client.delete_reply(id)?,
                other => {
                    return Err(LectioError::InvalidArg {
                        message: format!(
                            "unknown kind '{}' (expected comment, highlight, or reply)",
                            other
                        ),
                    })
                }
            }
            println!("Deleted {} {}", kind, id);
        }
        Commands::React { target, id } => {
            let config = config::load_config()?;
            let target = parse_target(&target)?;
            let client = ApiClient::new(&config);
            let ack = client.toggle_reaction(target, id)?;
            match ack.action {
                ReactionAction::Added => println!("Reaction added ({} total)", ack.count),
                ReactionAction::Removed => println!("Reaction removed ({} total)", ack.count),
            }
        }
        Commands::Privacy {
            target,
            id,
            private,
        } => {
            let config = config::load_config()?;
            let target = parse_target(&target)?;
            let client = ApiClient::new(&config);
            client.set_privacy(target, id, private)?;
            println!(
                "{} {} is now {}",
                target.as_str(),
                id,
                if private { "private" } else { "public" }
            );
        }
        Commands::MarkRead { date, unread } => {
            let config = config::load_config()?;
            let date = resolve_date(date)?;
            let client = ApiClient::new(&config);
            client.mark_read(&date, !unread)?;
            println!(
                "Marked {} as {}",
                date,
                if unread { "unread" } else { "read" }
            );
        }
        Commands::Config {
            translation,
            server,
        } => {
            let path = config::config_path()?;
            let mut config = config::load_config()?;
            if translation.is_none() && server.is_none() {
                println!("Config file: {}", path.display());
                println!("  server_url:      {}", config.server_url);
                println!("  scripture_api:   {}", config.scripture_api);
                println!("  translation:     {}", config.translation);
                println!("  highlight_color: {}", config.highlight_color);
                println!("  timeout_secs:    {}", config.timeout_secs);
                match &config.reading_plan {
                    Some(plan) => println!("  reading_plan:    {}", plan.display()),
                    None => println!("  reading_plan:    (not set)"),
                }
            } else {
                if let Some(translation) = translation {
                    config.translation = translation;
                }
                if let Some(server) = server {
                    config.server_url = server;
                }
                config::save_config(&config)?;
                println!("Saved {}", path.display());
            }
        }
    }
    Ok(())
}

/// Fetches and assembles the full passage for a reading day.
fn day_passage(config: &LectioConfig, date: &DateToken) -> Result<Passage> {
    let plan_path = config.reading_plan.clone().ok_or_else(|| LectioError::Config {
        message: "no reading plan configured; set `reading_plan` in the config file".to_string(),
    })?;
    let plan = ReadingPlan::load(&plan_path)?;

    let references = plan.references_for(date);
    if references.is_empty() {
        return Err(LectioError::Plan {
            message: format!("no reading scheduled for {}", date),
            path: plan_path.display().to_string(),
        });
    }

    let client = ApiClient::new(config);
    let mut verses = Vec::new();
    for reference in &references {
        let passage = client.fetch_passage(reference, &config.translation)?;
        verses.extend(passage.verses().to_vec());
    }
    Ok(Passage::new(verses))
}

/// Resolves an optional `MM-DD` argument, defaulting to today.
fn resolve_date(date: Option<String>) -> Result<DateToken> {
    match date {
        Some(date) => parse_date(&date),
        None => Ok(DateToken::today()),
    }
}

fn parse_date(input: &str) -> Result<DateToken> {
    DateToken::parse(input).ok_or_else(|| LectioError::InvalidArg {
        message: format!("invalid date '{}' (expected MM-DD)", input),
    })
}

fn parse_target(input: &str) -> Result<AnnotationTarget> {
    AnnotationTarget::from_str(input).ok_or_else(|| LectioError::InvalidArg {
        message: format!("unknown target '{}' (expected comment or highlight)", input),
    })
}
