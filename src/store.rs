use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use rusqlite::{params, Connection};
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::{PipelineError, Result};
use crate::types::{RawPageText, VocabularyEntry};

// ── JSON ──

pub fn load_pages(path: &Path) -> Result<Vec<RawPageText>> {
    let raw = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    parse_pages(&raw)
}

/// Input must be an array of `{page, text}` records. Any other shape is a
/// structural error; there is no partial recovery.
pub fn parse_pages(raw: &str) -> Result<Vec<RawPageText>> {
    let value: Value = serde_json::from_str(raw)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(PipelineError::Structural(format!(
                "expected an array of page records, found {}",
                kind(&other)
            )))
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| PipelineError::Structural(format!("record {}: {}", i, e)))
        })
        .collect()
}

/// A finished dataset, either a bare entry array or the report wrapper.
pub fn load_dataset(path: &Path) -> Result<Vec<VocabularyEntry>> {
    let raw = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    parse_dataset(&raw)
}

pub fn parse_dataset(raw: &str) -> Result<Vec<VocabularyEntry>> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(items) => Ok(serde_json::from_value(Value::Array(items))?),
        Value::Object(mut map) => match map.remove("vocabulary") {
            Some(vocabulary @ Value::Array(_)) => Ok(serde_json::from_value(vocabulary)?),
            _ => Err(PipelineError::Structural(
                "object has no \"vocabulary\" array".into(),
            )),
        },
        other => Err(PipelineError::Structural(format!(
            "expected an entry array or dataset object, found {}",
            kind(&other)
        ))),
    }
}

/// Pretty JSON written to a temp file beside `path`, then renamed over it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;

    let temp = NamedTempFile::new_in(parent).map_err(|e| PipelineError::io(parent, e))?;
    {
        let mut writer = BufWriter::new(&temp);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(|e| PipelineError::io(temp.path(), e))?;
    }
    temp.persist(path).map_err(|e| PipelineError::io(path, e.error))?;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── SQLite ──

pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vocabulary (
            word           TEXT PRIMARY KEY,
            part_of_speech TEXT NOT NULL,
            definition     TEXT NOT NULL,
            example        TEXT NOT NULL,
            difficulty     TEXT NOT NULL CHECK(difficulty IN ('easy','medium','hard')),
            word_length    INTEGER NOT NULL,
            syllable_count INTEGER NOT NULL,
            etymology      TEXT,
            memory_aid     TEXT,
            page           INTEGER NOT NULL,
            exported_at    TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_vocabulary_difficulty ON vocabulary(difficulty);

        CREATE TABLE IF NOT EXISTS vocabulary_categories (
            word     TEXT NOT NULL REFERENCES vocabulary(word),
            category TEXT NOT NULL,
            UNIQUE(word, category)
        );
        CREATE INDEX IF NOT EXISTS idx_categories_category ON vocabulary_categories(category);

        CREATE TABLE IF NOT EXISTS learning_tips (
            word     TEXT NOT NULL REFERENCES vocabulary(word),
            position INTEGER NOT NULL,
            tip      TEXT NOT NULL,
            UNIQUE(word, position)
        );
        ",
    )?;
    Ok(())
}

/// Upsert every entry with its categories and tips. Re-exporting a word
/// replaces its child rows.
pub fn export(conn: &Connection, entries: &[VocabularyEntry]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut v_stmt = tx.prepare(
            "INSERT INTO vocabulary (word, part_of_speech, definition, example, difficulty,
                                     word_length, syllable_count, etymology, memory_aid, page)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(word) DO UPDATE SET
                part_of_speech = excluded.part_of_speech,
                definition     = excluded.definition,
                example        = excluded.example,
                difficulty     = excluded.difficulty,
                word_length    = excluded.word_length,
                syllable_count = excluded.syllable_count,
                etymology      = excluded.etymology,
                memory_aid     = excluded.memory_aid,
                page           = excluded.page,
                exported_at    = datetime('now')",
        )?;
        let mut clear_c = tx.prepare("DELETE FROM vocabulary_categories WHERE word = ?1")?;
        let mut clear_t = tx.prepare("DELETE FROM learning_tips WHERE word = ?1")?;
        let mut c_stmt =
            tx.prepare("INSERT INTO vocabulary_categories (word, category) VALUES (?1, ?2)")?;
        let mut t_stmt =
            tx.prepare("INSERT INTO learning_tips (word, position, tip) VALUES (?1, ?2, ?3)")?;

        for e in entries {
            v_stmt.execute(params![
                e.word,
                e.part_of_speech.as_str(),
                e.definition,
                e.example,
                e.difficulty.as_str(),
                e.word_length as i64,
                e.syllable_count as i64,
                e.etymology,
                e.memory_aid,
                e.page,
            ])?;
            clear_c.execute(params![e.word])?;
            clear_t.execute(params![e.word])?;
            for category in &e.categories {
                c_stmt.execute(params![e.word, category])?;
            }
            for (i, tip) in e.learning_tips.iter().enumerate() {
                t_stmt.execute(params![e.word, i as i64, tip])?;
            }
        }
    }
    tx.commit()?;
    Ok(entries.len())
}
