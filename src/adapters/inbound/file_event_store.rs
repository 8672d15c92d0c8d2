use crate::common::{EventEnvelope, EventStore};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Event journal stored as JSON Lines, one file per coordinator id.
/// Envelopes are appended in the order given; reads filter on `sequence`.
pub struct FileEventStore {
    base_path: PathBuf,
}

impl FileEventStore {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_file_path(&self, aggregate_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", aggregate_id))
    }

    async fn ensure_base_dir(&self) -> Result<(), String> {
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| format!("Failed to create event journal directory: {}", e))
    }
}

#[async_trait]
impl EventStore for FileEventStore {
    async fn append_events(
        &self,
        aggregate_id: &str,
        events: Vec<EventEnvelope>,
    ) -> Result<(), String> {
        self.ensure_base_dir().await?;
        let file_path = self.get_file_path(aggregate_id);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .map_err(|e| format!("Failed to open event file {}: {}", file_path.display(), e))?;

        let mut buffer = Vec::new();
        for event in events {
            serde_json::to_writer(&mut buffer, &event)
                .map_err(|e| format!("Failed to serialize event: {}", e))?;
            buffer.push(b'\n');
        }

        file.write_all(&buffer)
            .await
            .map_err(|e| format!("Failed to write events: {}", e))?;
        file.flush()
            .await
            .map_err(|e| format!("Failed to flush file: {}", e))?;
        Ok(())
    }

    async fn load_events(
        &self,
        aggregate_id: &str,
        from_sequence: u64,
    ) -> Result<Vec<EventEnvelope>, String> {
        let file_path = self.get_file_path(aggregate_id);
        if !file_path.exists() {
            return Ok(vec![]);
        }

        let file = File::open(&file_path)
            .await
            .map_err(|e| format!("Failed to open event file {}: {}", file_path.display(), e))?;

        let mut lines = BufReader::new(file).lines();
        let mut events = Vec::new();
        let mut line_number = 0u64;
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| format!("Failed to read line: {}", e))?
        {
            line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            let event: EventEnvelope = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to deserialize event at line {}: {}", line_number, e)
            })?;
            if event.sequence >= from_sequence {
                events.push(event);
            }
        }
        Ok(events)
    }
}
