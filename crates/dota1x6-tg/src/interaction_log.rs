//! Append-only text log of the messages users send to the bot

use crate::prelude::*;
use crate::{err, err_ctx, Result};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use teloxide::types::User;
use tokio::io::AsyncWriteExt;

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct Config {
    #[serde(default = "default_path")]
    pub(crate) path: PathBuf,
}

fn default_path() -> PathBuf {
    "user_messages.txt".into()
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum InteractionLogError {
    #[error("Failed to append to the interaction log")]
    Append { source: std::io::Error },

    #[error("Failed to read the interaction log")]
    Read { source: std::io::Error },
}

pub(crate) struct InteractionLog {
    path: PathBuf,

    /// Serializes appends so that concurrent entries don't interleave
    lock: tokio::sync::Mutex<()>,
}

impl InteractionLog {
    /// Creates the log file if it doesn't exist yet
    pub(crate) async fn open(cfg: Config) -> Result<Self> {
        let log = Self {
            path: cfg.path,
            lock: Default::default(),
        };

        log.append_raw("").await?;

        Ok(log)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Failures are only logged, they must never prevent replying to the user
    pub(crate) async fn record(&self, user: Option<&User>, text: &str) {
        let entry = format_entry(Local::now(), user, text);

        if let Err(err) = self.append_raw(&entry).await {
            warn!(
                err = tracing_err(&err),
                path = %self.path.display(),
                "Couldn't write the user message to the interaction log"
            );
        }
    }

    async fn append_raw(&self, text: &str) -> Result {
        let _guard = self.lock.lock().await;

        let mut file = fs_err::tokio::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(err_ctx!(InteractionLogError::Append))?;

        file.write_all(text.as_bytes())
            .await
            .map_err(err_ctx!(InteractionLogError::Append))?;

        file.flush()
            .await
            .map_err(err_ctx!(InteractionLogError::Append))
    }

    /// Size in bytes, or zero if the file doesn't exist
    pub(crate) async fn size(&self) -> Result<u64> {
        match fs_err::tokio::metadata(&self.path).await {
            Ok(metadata) => Ok(metadata.len()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(source) => Err(err!(InteractionLogError::Read { source })),
        }
    }

    /// Returns up to `max_lines` last entries of the log
    pub(crate) async fn tail(&self, max_lines: usize) -> Result<Vec<String>> {
        let content = fs_err::tokio::read_to_string(&self.path)
            .await
            .map_err(err_ctx!(InteractionLogError::Read))?;

        let lines: Vec<_> = content.lines().collect();
        let skip = lines.len().saturating_sub(max_lines);

        Ok(lines[skip..].iter().map(|&line| line.to_owned()).collect())
    }
}

/// One line per entry. Line breaks in the text are replaced with spaces.
fn format_entry(timestamp: DateTime<Local>, user: Option<&User>, text: &str) -> String {
    let id = user.map(|user| user.id.to_string());
    let first_name = user.map(|user| user.first_name.as_str());
    let username = user.and_then(|user| user.username.as_deref());
    let text = text.replace(['\r', '\n'], " ");

    format!(
        "{} | ID:{} | Имя:{} | Username:@{} | {text}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
        id.as_deref().unwrap_or("None"),
        first_name.unwrap_or("None"),
        username.unwrap_or("None"),
    )
}

/// Trims the lines from the start to fit into `max_chars`
pub(crate) fn preview(lines: &[String], max_chars: usize) -> String {
    if lines.is_empty() {
        return "(пусто)".to_owned();
    }

    let text = lines.join("\n");

    if text.chars().count() <= max_chars {
        return text;
    }

    format!("...{}", text.tail_chars(max_chars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use expect_test::expect;
    use teloxide::types::UserId;

    fn user(username: Option<&str>) -> User {
        User {
            id: UserId(741409144),
            is_bot: false,
            first_name: "Вася".to_owned(),
            last_name: None,
            username: username.map(ToOwned::to_owned),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap()
    }

    #[test]
    fn entry_format() {
        let user = user(Some("vasya"));

        expect![[r#"
            "2024-05-01 12:34:56.000000 | ID:741409144 | Имя:Вася | Username:@vasya | /start\n"
        "#]]
        .assert_debug_eq(&format_entry(timestamp(), Some(&user), "/start"));

        let user = self::user(None);

        expect![[r#"
            "2024-05-01 12:34:56.000000 | ID:741409144 | Имя:Вася | Username:@None | two lines\n"
        "#]]
        .assert_debug_eq(&format_entry(timestamp(), Some(&user), "two\nlines"));

        expect![[r#"
            "2024-05-01 12:34:56.000000 | ID:None | Имя:None | Username:@None | text\n"
        "#]]
        .assert_debug_eq(&format_entry(timestamp(), None, "text"));
    }

    #[test]
    fn preview_trimming() {
        assert_eq!(preview(&[], 10), "(пусто)");

        let lines = ["abc".to_owned(), "def".to_owned()];
        assert_eq!(preview(&lines, 7), "abc\ndef");
        assert_eq!(preview(&lines, 5), "...c\ndef");
    }

    #[test_log::test(tokio::test)]
    async fn append_and_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_messages.txt");

        let log = InteractionLog::open(Config { path: path.clone() }).await.unwrap();
        assert_eq!(log.size().await.unwrap(), 0);
        assert!(log.tail(50).await.unwrap().is_empty());

        let user = user(Some("vasya"));
        for i in 0..5 {
            log.record(Some(&user), &format!("message {i}")).await;
        }

        let tail = log.tail(2).await.unwrap();
        assert_eq!(tail.len(), 2);
        assert!(tail[0].ends_with("| message 3"), "{tail:?}");
        assert!(tail[1].ends_with("| message 4"), "{tail:?}");

        // Reopening must not truncate the log
        let log = InteractionLog::open(Config { path }).await.unwrap();
        assert_eq!(log.tail(50).await.unwrap().len(), 5);
        assert!(log.size().await.unwrap() > 0);
    }

    #[test_log::test(tokio::test)]
    async fn missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let log = InteractionLog {
            path: dir.path().join("missing.txt"),
            lock: Default::default(),
        };

        assert_eq!(log.size().await.unwrap(), 0);
        assert!(log.tail(50).await.is_err());
    }
}
