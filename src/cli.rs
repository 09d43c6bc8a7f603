// src/cli.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "moodlog - A mood journal for the command line",
    long_about = "moodlog keeps one short journal entry per day, each with a mood score and tags, in a local SQLite database. It tracks your writing streak and lets you search past entries by text, tag or date."
)]
pub struct Cli {
    /// Path to the journal database.
    #[arg(long, global = true, env = "MOODLOG_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Mood and tag options shared by `write` and `edit`.
#[derive(Args, Debug)]
pub struct EntryArgs {
    #[arg(short, long, help = "Entry text. Opens the editor when omitted")]
    pub message: Option<String>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(1..=5),
        conflicts_with = "score",
        help = "Mood on a 1-5 scale (1 = furious, 5 = ecstatic)"
    )]
    pub mood: Option<u8>,

    #[arg(long, allow_negative_numbers = true, help = "Exact mood score, -10 to 10")]
    pub score: Option<i32>,

    #[arg(short, long, help = "Comma-separated tags")]
    pub tags: Option<String>,

    #[arg(long, help = "Day of the entry (format: YYYY-MM-DD)")]
    pub date: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates the journal database or upgrades an older one.
    Init,

    /// Writes a new entry, for today unless --date is given.
    Write {
        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Rewrites an existing entry by its ID.
    /// Fields not given keep their current value; without -m the editor opens on the old text.
    Edit {
        #[arg(help = "The numeric ID of the entry to edit")]
        id: i64,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Shows the entries of one day.
    Show {
        #[arg(long, help = "Day to show (format: YYYY-MM-DD). Defaults to today")]
        date: Option<String>,
    },

    /// Lists every entry, newest first.
    List,

    /// Searches content and tags, or dates such as "Aug 3" or "2024".
    /// An empty query lists every entry.
    Search {
        #[arg(default_value = "")]
        query: String,
    },

    /// Deletes one or more entries.
    #[command(verbatim_doc_comment)]
    Del {
        /// A list of entry IDs to delete.
        /// Examples:
        ///   moodlog del 5          (deletes entry #5)
        ///   moodlog del 3,5,8      (deletes entries #3, #5, #8)
        ///   moodlog del 7-9        (deletes entries #7, #8, #9)
        #[arg(value_name = "ID_LIST")]
        ids: String,

        #[arg(short, long, help = "Delete without asking for confirmation")]
        yes: bool,
    },

    /// Shows the current writing streak.
    Streak,

    /// Shows the mood bucket for a score.
    Mood {
        #[arg(allow_negative_numbers = true)]
        score: i32,
    },
}
