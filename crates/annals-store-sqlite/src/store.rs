//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::{Path, PathBuf};

use annals_core::{
  event::{Event, EventId, NewEvent},
  setting::SettingKey,
  store::RecordStore,
  topic::TopicContent,
};
use rusqlite::OptionalExtension as _;
use serde_json::Value;

use crate::{
  Error, Result,
  encode::{EventRow, RawEvent, decode_value, encode_value},
  schema::{MIGRATIONS, PRAGMAS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An annals record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring its schema up to date.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(path.clone())
      .await
      .map_err(|source| Error::Open { path: path.clone(), source })?;
    Self::init(conn, path).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let path = PathBuf::from(":memory:");
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(|source| Error::Open { path: path.clone(), source })?;
    Self::init(conn, path).await
  }

  async fn init(conn: tokio_rusqlite::Connection, path: PathBuf) -> Result<Self> {
    let (from, to) = conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        let current: i64 =
          conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        let mut reached = current;
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
          let tx = conn.transaction()?;
          tx.execute_batch(migration.sql)?;
          tx.pragma_update(None, "user_version", migration.version)?;
          tx.commit()?;
          tracing::debug!(
            version = migration.version,
            name = migration.name,
            "applied migration"
          );
          reached = migration.version;
        }
        Ok((current, reached))
      })
      .await
      .map_err(|source| Error::Open { path: path.clone(), source })?;

    if from != to {
      tracing::info!(path = %path.display(), from, to, "upgraded store schema");
    }
    Ok(Self { conn })
  }

  /// The schema version recorded in the database.
  pub async fn schema_version(&self) -> Result<i64> {
    let version = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?))
      .await?;
    Ok(version)
  }

  async fn count(&self, table: &'static str) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
      })
      .await?;
    Ok(n as usize)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Events ────────────────────────────────────────────────────────────────

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM events ORDER BY id",
          RawEvent::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn get_event(&self, id: EventId) -> Result<Option<Event>> {
    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM events WHERE id = ?1", RawEvent::COLUMNS),
              rusqlite::params![id.0],
              RawEvent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn add_event(&self, input: NewEvent) -> Result<Event> {
    input.validate()?;
    let row = EventRow::from_entry(input)?;

    let (id, row) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (
             date, description, tag, file_links, condemnation, condemnation_description
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            row.date,
            row.description,
            row.tag,
            row.file_links,
            row.condemnation,
            row.condemnation_description,
          ],
        )?;
        Ok((conn.last_insert_rowid(), row))
      })
      .await?;

    RawEvent {
      id,
      date: row.date,
      description: row.description,
      tag: row.tag,
      file_links: row.file_links,
      condemnation: row.condemnation,
      condemnation_description: row.condemnation_description,
    }
    .into_event()
  }

  async fn update_event(&self, event: &Event) -> Result<()> {
    let id = event.id;
    let row = EventRow::from_event(event)?;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE events SET
             date = ?2, description = ?3, tag = ?4, file_links = ?5,
             condemnation = ?6, condemnation_description = ?7
           WHERE id = ?1",
          rusqlite::params![
            id.0,
            row.date,
            row.description,
            row.tag,
            row.file_links,
            row.condemnation,
            row.condemnation_description,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::EventNotFound(id));
    }
    Ok(())
  }

  async fn replace_events(&self, events: Vec<NewEvent>) -> Result<usize> {
    let rows = events
      .into_iter()
      .map(EventRow::from_record)
      .collect::<Result<Vec<_>>>()?;

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM events", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO events (
               date, description, tag, file_links, condemnation, condemnation_description
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          )?;
          for row in &rows {
            stmt.execute(rusqlite::params![
              row.date,
              row.description,
              row.tag,
              row.file_links,
              row.condemnation,
              row.condemnation_description,
            ])?;
          }
        }
        tx.commit()?;
        Ok(rows.len())
      })
      .await?;

    tracing::debug!(inserted, "replaced events collection");
    Ok(inserted)
  }

  async fn count_events(&self) -> Result<usize> { self.count("events").await }

  // ── Topic contents ────────────────────────────────────────────────────────

  async fn list_topic_contents(&self) -> Result<Vec<TopicContent>> {
    let contents = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, content FROM topic_contents ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(TopicContent { id: row.get(0)?, content: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(contents)
  }

  async fn get_topic_content(&self, id: &str) -> Result<Option<TopicContent>> {
    let id = id.to_owned();
    let content = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, content FROM topic_contents WHERE id = ?1",
              rusqlite::params![id],
              |row| Ok(TopicContent { id: row.get(0)?, content: row.get(1)? }),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(content)
  }

  async fn put_topic_content(&self, content: TopicContent) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO topic_contents (id, content) VALUES (?1, ?2)
           ON CONFLICT(id) DO UPDATE SET content = excluded.content",
          rusqlite::params![content.id, content.content],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_topic_contents(&self, contents: Vec<TopicContent>) -> Result<usize> {
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM topic_contents", [])?;
        {
          let mut stmt =
            tx.prepare("INSERT INTO topic_contents (id, content) VALUES (?1, ?2)")?;
          for c in &contents {
            stmt.execute(rusqlite::params![c.id, c.content])?;
          }
        }
        tx.commit()?;
        Ok(contents.len())
      })
      .await?;

    tracing::debug!(inserted, "replaced topic contents");
    Ok(inserted)
  }

  async fn count_topic_contents(&self) -> Result<usize> {
    self.count("topic_contents").await
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn get_setting(&self, key: SettingKey) -> Result<Option<Value>> {
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM settings WHERE key = ?1",
              rusqlite::params![key.as_str()],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_value).transpose()
  }

  async fn put_setting(&self, key: SettingKey, value: Value) -> Result<()> {
    let encoded = encode_value(&value)?;
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO settings (key, value) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value",
          rusqlite::params![key.as_str(), encoded],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_setting_if_absent(&self, key: SettingKey, value: Value) -> Result<bool> {
    let encoded = encode_value(&value)?;
    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
          rusqlite::params![key.as_str(), encoded],
        )?)
      })
      .await?;
    Ok(inserted == 1)
  }
}
