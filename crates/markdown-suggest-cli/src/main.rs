use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markdown_suggest_config::Config;
use markdown_suggest_engine::{
    Document, EditProposal, Resolution, SuggestionSession, TextChange,
    editing::resolve_all,
    io::{read_document, write_document},
    parsing::{parse, parse_threads},
    render::markdown_to_html,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "markdown-suggest",
    version,
    about = "Inspect and resolve tracked changes in a markdown file"
)]
struct Cli {
    /// Markdown file to work on.
    file: PathBuf,

    /// Author recorded on new suggestions and comments.
    #[arg(long, global = true)]
    author: Option<String>,

    /// Write the result back to FILE instead of printing it.
    #[arg(short, long, global = true)]
    write: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every markup range with its offsets.
    List,
    /// List comment threads.
    Threads,
    /// Accept the suggestion at a byte offset.
    Accept {
        #[arg(long)]
        at: usize,
    },
    /// Reject the suggestion at a byte offset.
    Reject {
        #[arg(long)]
        at: usize,
    },
    /// Accept every suggestion and drop all comments.
    AcceptAll,
    /// Reject every suggestion and drop all comments.
    RejectAll,
    /// Apply an edit as a suggestion.
    Edit {
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
        #[arg(long, default_value = "")]
        insert: String,
    },
    /// Comment on a byte range (empty range for a bare comment).
    Comment {
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
        #[arg(long)]
        body: String,
    },
    /// Render the file to HTML with suggestions marked up.
    Html,
}

/// What a command produced.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// Text for stdout; the file is unchanged.
    Report(String),
    /// New file contents.
    Updated(String),
}

fn run(command: &Command, text: &str, session: SuggestionSession) -> Result<Outcome> {
    let outcome = match command {
        Command::List => Outcome::Report(list_ranges(text)),
        Command::Threads => Outcome::Report(list_threads(text)),
        Command::Accept { at } => resolve_one(text, *at, Resolution::Accept),
        Command::Reject { at } => resolve_one(text, *at, Resolution::Reject),
        Command::AcceptAll => Outcome::Updated(resolve_all(text, Resolution::Accept)),
        Command::RejectAll => Outcome::Updated(resolve_all(text, Resolution::Reject)),
        Command::Edit { from, to, insert } => {
            let mut doc = Document::from_text(text);
            doc.set_session(session.enabled(true));
            doc.propose(EditProposal::input(TextChange::new(*from, *to, insert.as_str())))
                .with_context(|| format!("Failed to apply edit {from}..{to}"))?;
            Outcome::Updated(doc.text())
        }
        Command::Comment { from, to, body } => {
            let mut doc = Document::from_text(text);
            doc.set_session(session);
            doc.add_comment(*from..*to, body)
                .with_context(|| format!("Failed to comment on {from}..{to}"))?;
            Outcome::Updated(doc.text())
        }
        Command::Html => Outcome::Report(markdown_to_html(text)),
    };
    Ok(outcome)
}

fn resolve_one(text: &str, at: usize, resolution: Resolution) -> Outcome {
    let mut doc = Document::from_text(text);
    match doc.resolve_at(at, resolution) {
        Some(_) => Outcome::Updated(doc.text()),
        None => Outcome::Report(format!("No suggestion at offset {at}\n")),
    }
}

fn list_ranges(text: &str) -> String {
    let mut out = String::new();
    for r in parse(text) {
        out.push_str(&format!(
            "{}..{}\t{}\t{}\t{:?}\n",
            r.span.start,
            r.span.end,
            r.kind,
            r.author().unwrap_or("-"),
            r.content
        ));
    }
    out
}

fn list_threads(text: &str) -> String {
    let ranges = parse(text);
    let mut out = String::new();
    for thread in parse_threads(&ranges) {
        let anchor = thread
            .anchor(&ranges)
            .map(|h| format!(" on {:?}", h.content))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}..{}{anchor}\n",
            thread.span.start, thread.span.end
        ));
        for c in &thread.comments {
            out.push_str(&format!("  {}: {}\n", c.author().unwrap_or("anonymous"), c.content));
        }
    }
    out
}

fn load_session(cli_author: Option<String>) -> SuggestionSession {
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            Config::default()
        }
    };
    SuggestionSession {
        enabled: config.suggestion_mode,
        author: cli_author.or(config.author),
        merge_window_ms: config.merge_window_ms,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let text = read_document(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let session = load_session(cli.author.clone());

    match run(&cli.command, &text, session)? {
        Outcome::Report(report) => print!("{report}"),
        Outcome::Updated(updated) if cli.write => {
            write_document(&cli.file, &updated)
                .with_context(|| format!("Failed to write {}", cli.file.display()))?;
            log::info!("Updated {}", cli.file.display());
        }
        Outcome::Updated(updated) => print!("{updated}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn session() -> SuggestionSession {
        SuggestionSession::new(Some("cli".into()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommand_with_global_flags() {
        let cli = Cli::try_parse_from(["markdown-suggest", "notes.md", "accept", "--at", "7", "--write"])
            .unwrap();
        assert!(cli.write);
        assert!(matches!(cli.command, Command::Accept { at: 7 }));
    }

    #[test]
    fn list_shows_offsets_and_authors() {
        let text = r#"a {++b++} {--{"author":"eve"}@@c--}"#;
        let report = run(&Command::List, text, session()).unwrap();
        assert_eq!(
            report,
            Outcome::Report("2..9\taddition\t-\t\"b\"\n10..35\tdeletion\teve\t\"c\"\n".to_string())
        );
    }

    #[test]
    fn threads_show_anchor_and_replies() {
        let text = "{==x==}{>>why<<}{>>because<<}";
        let Outcome::Report(report) = run(&Command::Threads, text, session()).unwrap() else {
            panic!("expected a report");
        };
        assert_eq!(report, "7..29 on \"x\"\n  anonymous: why\n  anonymous: because\n");
    }

    #[test]
    fn accept_and_reject_at_offset() {
        let text = "hello {--removed--} end";
        assert_eq!(
            run(&Command::Accept { at: 10 }, text, session()).unwrap(),
            Outcome::Updated("hello  end".to_string())
        );
        assert_eq!(
            run(&Command::Reject { at: 10 }, text, session()).unwrap(),
            Outcome::Updated("hello removed end".to_string())
        );
    }

    #[test]
    fn accept_outside_markup_reports() {
        let outcome = run(&Command::Accept { at: 1 }, "plain", session()).unwrap();
        assert!(matches!(outcome, Outcome::Report(_)));
    }

    #[test]
    fn edit_is_recorded_as_suggestion() {
        let command = Command::Edit {
            from: 6,
            to: 11,
            insert: "there".to_string(),
        };
        let Outcome::Updated(text) = run(&command, "hello world", session()).unwrap() else {
            panic!("expected an update");
        };
        assert!(text.starts_with(r#"hello {~~{"author":"cli","timestamp":"#));
        assert!(text.ends_with("@@world~>there~~}"));
    }

    #[test]
    fn bad_edit_offsets_are_an_error() {
        let command = Command::Edit {
            from: 0,
            to: 99,
            insert: String::new(),
        };
        assert!(run(&command, "short", session()).is_err());
    }

    #[test]
    fn comment_highlights_selection() {
        let command = Command::Comment {
            from: 0,
            to: 4,
            body: "hmm".to_string(),
        };
        let Outcome::Updated(text) = run(&command, "text", session()).unwrap() else {
            panic!("expected an update");
        };
        assert!(text.starts_with("{==text==}{>>"));
        assert_eq!(parse_threads(&parse(&text)).len(), 1);
    }

    #[test]
    fn accept_all_then_html() {
        assert_eq!(
            run(&Command::AcceptAll, "a{++b++}{>>c<<}", session()).unwrap(),
            Outcome::Updated("ab".to_string())
        );
        assert_eq!(
            run(&Command::Html, "{++new++}", session()).unwrap(),
            Outcome::Report("<p><ins>new</ins></p>\n".to_string())
        );
    }

    #[test]
    fn read_edit_write_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        write_document(&path, "keep {--drop--}").unwrap();

        let text = read_document(&path).unwrap();
        let Outcome::Updated(updated) = run(&Command::AcceptAll, &text, session()).unwrap() else {
            panic!("expected an update");
        };
        write_document(&path, &updated).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep ");
    }
}
