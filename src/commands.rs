// src/commands.rs

use crate::cli::EntryArgs;
use crate::config::Config;
use crate::db::{EntryStore, SqliteStore};
use crate::error::{MoodlogError, Result};
use crate::models::{day_start_millis, format_date, JournalEntry, Tags, DAY_MILLIS};
use crate::mood::{level_for_score, score_for_level, Mood};
use crate::streak;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::io::{self, Write};
use std::process::Command;

/// Creates or upgrades the database and reports its path, schema version and size.
pub fn handle_init(config: &Config) -> Result<()> {
    let store = SqliteStore::open(&config.db_path)?;
    println!("✓ Database ready at: {}", config.db_path.display());
    let count = store.count()?;
    println!(
        "  Schema version {}, {} entr{}.",
        store.schema_version()?,
        count,
        if count == 1 { "y" } else { "ies" }
    );
    Ok(())
}

/// Saves a new entry. Falls back to the editor when no message is given and
/// refuses blank content.
pub fn handle_write(store: &impl EntryStore, config: &Config, args: EntryArgs) -> Result<()> {
    let content = match args.message {
        Some(msg) => msg,
        None => open_editor(&config.editor, "")?,
    };
    let content = require_content(&content)?;

    let date = match args.date.as_deref() {
        Some(d) => day_start_millis(parse_day(d)?),
        None => day_start_millis(Local::now().date_naive()),
    };
    let mood = resolve_score(args.mood, args.score).unwrap_or(0);
    let tags = args.tags.as_deref().map(Tags::parse).unwrap_or_default();

    if let Some(existing) = store.get_in_range(date, date + DAY_MILLIS - 1)? {
        println!(
            "Note: entry #{} already exists for this day; `moodlog edit {}` changes it.",
            existing.id, existing.id
        );
    }

    let mut entry = JournalEntry::new(content, mood, tags, date);
    if !store.add_or_update(&mut entry)? {
        return Err(MoodlogError::InvalidInput("entry was not saved".to_string()));
    }
    info!("wrote entry #{}", entry.id);
    println!("✓ Entry #{} recorded for {}.", entry.id, entry.formatted_date());
    Ok(())
}

/// Rewrites entry `id`; options left out keep the stored value.
pub fn handle_edit(store: &impl EntryStore, config: &Config, id: i64, args: EntryArgs) -> Result<()> {
    let mut entry = store.get_by_id(id)?.ok_or(MoodlogError::EntryNotFound(id))?;

    let content = match args.message {
        Some(msg) => msg,
        None => open_editor(&config.editor, &entry.content)?,
    };
    entry.content = require_content(&content)?;

    if let Some(score) = resolve_score(args.mood, args.score) {
        entry.mood = score;
    }
    if let Some(tags) = args.tags.as_deref() {
        entry.tags = Tags::parse(tags);
    }
    if let Some(d) = args.date.as_deref() {
        entry.date = day_start_millis(parse_day(d)?);
    }

    if !store.add_or_update(&mut entry)? {
        return Err(MoodlogError::EntryNotFound(id));
    }
    println!("✓ Entry #{} updated.", id);
    Ok(())
}

/// Prints the entries of one day, today by default.
pub fn handle_show(store: &impl EntryStore, date: Option<String>) -> Result<()> {
    let day = match date.as_deref() {
        Some(d) => parse_day(d)?,
        None => Local::now().date_naive(),
    };
    let entries = store.get_by_date(day_start_millis(day))?;
    if entries.is_empty() {
        println!("No entries for {}.", format_date(day_start_millis(day)));
        return Ok(());
    }
    print_entries(&entries, false);
    Ok(())
}

pub fn handle_list(store: &impl EntryStore) -> Result<()> {
    let entries = store.get_all()?;
    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }
    print_entries(&entries, true);
    print_count(entries.len());
    Ok(())
}

/// Prints entries matching `query`. A blank query lists everything.
pub fn handle_search(store: &impl EntryStore, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return handle_list(store);
    }
    let entries = store.search(query)?;
    debug!("search {:?} matched {} entries", query, entries.len());
    if entries.is_empty() {
        println!("No entries match \"{}\".", query);
        return Ok(());
    }
    print_entries(&entries, true);
    print_count(entries.len());
    Ok(())
}

/// Deletes the ids in an id list after confirmation. Ranges go to the store as
/// one statement.
pub fn handle_del(store: &impl EntryStore, ids_str: &str, yes: bool) -> Result<()> {
    let spans = parse_id_range(ids_str)?;
    if spans.is_empty() {
        println!("No valid entry IDs to delete.");
        return Ok(());
    }

    if !yes {
        let listed: Vec<String> = spans.iter().map(describe_span).collect();
        println!(
            "You are about to permanently delete the following entry IDs: {}",
            listed.join(", ")
        );
        print!("Confirm deletion? (y/N): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let mut deleted = 0;
    for span in spans {
        let (start, end) = (*span.start(), *span.end());
        if start != end {
            deleted += store.delete_range(start, end)?;
        } else if store.delete(start)? {
            deleted += 1;
        } else {
            warn!("entry #{} not found, nothing deleted", start);
            eprintln!("Entry #{} not found.", start);
        }
    }
    println!("✓ Deleted {} entr{}.", deleted, if deleted == 1 { "y" } else { "ies" });
    Ok(())
}

pub fn handle_streak(store: &impl EntryStore) -> Result<()> {
    let entries = store.get_all()?;
    let count = streak::current_streak(&entries);
    println!("🔥 Current streak: {} day{}", count, if count == 1 { "" } else { "s" });
    if let Some(start) = streak::current_streak_start_date(&entries) {
        println!("   Latest run started: {}", format_date(start));
    }
    Ok(())
}

pub fn handle_mood(score: i32) -> Result<()> {
    println!("{} (level {})", Mood::classify(score), level_for_score(score));
    Ok(())
}

/// Longest content shown per entry in `list` and `search`.
const PREVIEW_CHARS: usize = 120;

fn print_entries(entries: &[JournalEntry], abbreviate: bool) {
    for entry in entries {
        let mood = Mood::classify(entry.mood);
        let tags_display = if entry.tags.is_empty() {
            String::new()
        } else {
            format!(" | Tags: {}", entry.tags.as_slice().join(", "))
        };
        println!(
            "[{}] {} {} ({}){}",
            entry.id,
            entry.formatted_date(),
            mood,
            entry.mood,
            tags_display
        );
        let content = entry.content.trim_end();
        if abbreviate {
            println!("{}", preview(content));
        } else {
            println!("{}", content);
        }
        println!("{}", "─".repeat(40));
    }
}

fn print_count(count: usize) {
    println!("{} entr{}.", count, if count == 1 { "y" } else { "ies" });
}

/// First `PREVIEW_CHARS` characters of `content`, with "..." when cut.
fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// An exact score wins over a 1-5 level; neither means "leave unset".
fn resolve_score(level: Option<u8>, score: Option<i32>) -> Option<i32> {
    score.or_else(|| level.map(score_for_level))
}

fn require_content(content: &str) -> Result<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(MoodlogError::EmptyContent);
    }
    Ok(content.to_string())
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| MoodlogError::InvalidInput("Invalid date format. Use YYYY-MM-DD.".to_string()))
}

/// Opens `editor` on a temp file seeded with `initial` and returns the saved text.
fn open_editor(editor: &str, initial: &str) -> Result<String> {
    let mut temp_file = tempfile::NamedTempFile::new()?;
    temp_file.write_all(initial.as_bytes())?;
    temp_file.flush()?;

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| MoodlogError::InvalidInput("Editor command is empty.".to_string()))?;
    debug!("launching editor {:?}", editor);
    let status = Command::new(program)
        .args(parts)
        .arg(temp_file.path())
        .status()?;
    if !status.success() {
        return Err(MoodlogError::EditorError);
    }
    Ok(std::fs::read_to_string(temp_file.path())?)
}

/// Parses an ID list such as "1,3,5-7" into sorted, deduplicated spans.
/// Single ids become one-element spans; ranges are never expanded.
fn parse_id_range(s: &str) -> Result<Vec<RangeInclusive<i64>>> {
    let mut spans = BTreeSet::new();
    for part in s.split(',') {
        let part = part.trim();
        if let Some((start_str, end_str)) = part.split_once('-') {
            let (start_str, end_str) = (start_str.trim(), end_str.trim());
            if start_str.is_empty() || end_str.is_empty() {
                return Err(MoodlogError::InvalidInput(format!("Invalid range: {}", part)));
            }
            let start = parse_id(start_str)?;
            let end = parse_id(end_str)?;
            if start > end {
                return Err(MoodlogError::InvalidInput(format!(
                    "Start of range {} cannot be greater than end {}",
                    start, end
                )));
            }
            spans.insert((start, end));
        } else if !part.is_empty() {
            let id = parse_id(part)?;
            spans.insert((id, id));
        }
    }
    Ok(spans.into_iter().map(|(start, end)| start..=end).collect())
}

fn describe_span(span: &RangeInclusive<i64>) -> String {
    if span.start() == span.end() {
        span.start().to_string()
    } else {
        format!("{}-{}", span.start(), span.end())
    }
}

fn parse_id(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| MoodlogError::InvalidInput(format!("Invalid ID: {}", s)))
}
