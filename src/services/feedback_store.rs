//! Flat-file feedback tickets.
//!
//! All tickets live in one JSON array. Every mutation reads the whole file,
//! changes it in memory and writes it back while holding `lock`, so writers
//! inside this process never lose each other's updates. Separate processes
//! sharing the file are not coordinated.

use anyhow::{Context, Result};
use chrono::Utc;
use rand::seq::IndexedRandom;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::feedback::{
    CreateFeedbackRequest, FeedbackStatus, FeedbackTicket, FeedbackType,
};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `<unix millis>-<6 random base36 chars>`
fn new_ticket_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .filter_map(|_| BASE36.choose(&mut rng).map(|b| *b as char))
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Next case number for `feedback_type`: highest existing number with the
/// same prefix plus one, zero padded to three digits.
pub fn next_case_number(tickets: &[FeedbackTicket], feedback_type: FeedbackType) -> String {
    let prefix = feedback_type.case_prefix();
    let highest = tickets
        .iter()
        .filter_map(|t| t.case_number.strip_prefix(prefix)?.strip_prefix('-'))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{:03}", prefix, highest + 1)
}

pub struct FeedbackStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "feedback.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Missing or unreadable files count as empty. Only for reads; writers
    /// go through [`Self::load_for_update`].
    async fn load(&self) -> Vec<FeedbackTicket> {
        self.load_for_update().await.unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to load feedback file");
            Vec::new()
        })
    }

    /// Like `load`, but only a missing file counts as empty. A file that
    /// exists and cannot be read or parsed is an error, so a write never
    /// replaces tickets it could not see.
    async fn load_for_update(&self) -> Result<Vec<FeedbackTicket>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        serde_json::from_slice(&bytes)
            .with_context(|| format!("{} is not a valid feedback file", self.path.display()))
    }

    async fn save(&self, tickets: &[FeedbackTicket]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(tickets).context("Failed to serialize feedback")?;

        // Write beside the file and rename over it so a crash never leaves
        // a half-written array behind.
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = tickets.len(), "Feedback file written");
        Ok(())
    }

    /// Tickets newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<FeedbackStatus>) -> Vec<FeedbackTicket> {
        let _guard = self.lock.lock().await;
        let mut tickets: Vec<_> = self
            .load()
            .await
            .into_iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tickets
    }

    pub async fn create(&self, req: CreateFeedbackRequest) -> Result<FeedbackTicket> {
        let _guard = self.lock.lock().await;
        let mut tickets = self.load_for_update().await?;

        let ticket = FeedbackTicket {
            id: new_ticket_id(),
            case_number: next_case_number(&tickets, req.feedback_type),
            feedback_type: req.feedback_type,
            title: req.title.trim().to_string(),
            description: req.description.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            status: FeedbackStatus::Open,
            screenshots: req.screenshots.unwrap_or_default(),
            page_url: req.page_url.unwrap_or_default(),
            created_at: Utc::now(),
        };

        tickets.push(ticket.clone());
        self.save(&tickets).await?;

        info!(id = %ticket.id, case_number = %ticket.case_number, "Feedback ticket created");
        Ok(ticket)
    }

    pub async fn get(&self, id: &str) -> Option<FeedbackTicket> {
        let _guard = self.lock.lock().await;
        self.load().await.into_iter().find(|t| t.id == id)
    }

    /// Applies `status` if given. Returns `None` when the id is unknown.
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<FeedbackStatus>,
    ) -> Result<Option<FeedbackTicket>> {
        let _guard = self.lock.lock().await;
        let mut tickets = self.load_for_update().await?;

        let Some(ticket) = tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(status) = status {
            ticket.status = status;
        }
        let updated = ticket.clone();
        self.save(&tickets).await?;

        info!(id = %id, status = ?updated.status, "Feedback ticket updated");
        Ok(Some(updated))
    }

    /// Returns `false` when the id is unknown.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut tickets = self.load_for_update().await?;

        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        if tickets.len() == before {
            return Ok(false);
        }

        self.save(&tickets).await?;
        info!(id = %id, "Feedback ticket deleted");
        Ok(true)
    }
}
