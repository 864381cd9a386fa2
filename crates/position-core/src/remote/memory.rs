//! In-Memory Remote
//!
//! Behaves like a json-server style backend kept in process: sequential ids,
//! 404 for unknown ids, full-record replacement on update.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::PositionRemote;
use crate::domain::{Position, PositionDraft};
use crate::error::{RemoteError, RemoteResult};

#[derive(Debug)]
pub struct InMemoryPositionRemote {
    records: RefCell<Vec<Position>>,
    next_id: Cell<u64>,
    /// Error handed out by the next call, whichever it is
    failure: RefCell<Option<RemoteError>>,
}

impl Default for InMemoryPositionRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPositionRemote {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            failure: RefCell::new(None),
        }
    }

    /// Seed with existing records; new ids continue after the largest numeric id
    pub fn with_positions(positions: Vec<Position>) -> Self {
        let next_id = positions
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            records: RefCell::new(positions),
            next_id: Cell::new(next_id),
            failure: RefCell::new(None),
        }
    }

    /// Make the next call fail with `err`
    pub fn fail_next(&self, err: RemoteError) {
        *self.failure.borrow_mut() = Some(err);
    }

    /// Current backend-side records
    pub fn records(&self) -> Vec<Position> {
        self.records.borrow().clone()
    }

    fn take_failure(&self) -> RemoteResult<()> {
        match self.failure.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn allocate_id(&self) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id.to_string()
    }
}

#[async_trait(?Send)]
impl PositionRemote for InMemoryPositionRemote {
    async fn list(&self) -> RemoteResult<Vec<Position>> {
        self.take_failure()?;
        Ok(self.records())
    }

    async fn get(&self, id: &str) -> RemoteResult<Position> {
        self.take_failure()?;
        self.records
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::not_found(format!("position {}", id)))
    }

    async fn create(&self, draft: &PositionDraft) -> RemoteResult<Position> {
        self.take_failure()?;
        let created = draft.clone().into_position(self.allocate_id());
        self.records.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update(&self, position: &Position) -> RemoteResult<Position> {
        self.take_failure()?;
        let mut records = self.records.borrow_mut();
        let slot = records
            .iter_mut()
            .find(|p| p.id == position.id)
            .ok_or_else(|| RemoteError::not_found(format!("position {}", position.id)))?;
        *slot = position.clone();
        Ok(position.clone())
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.take_failure()?;
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|p| p.id != id);
        if records.len() == before {
            return Err(RemoteError::not_found(format!("position {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let remote = InMemoryPositionRemote::new();

        let ceo = remote.create(&PositionDraft::new("CEO")).await.unwrap();
        let cto = remote.create(&PositionDraft::new("CTO").with_parent(&ceo.id)).await.unwrap();
        assert_eq!(ceo.id, "1");
        assert_eq!(cto.id, "2");

        let renamed = remote.update(&Position::new("2", "Chief Tech").with_parent("1")).await.unwrap();
        assert_eq!(remote.get("2").await.unwrap(), renamed);

        remote.delete("1").await.unwrap();
        assert_eq!(remote.list().await.unwrap(), vec![renamed]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let remote = InMemoryPositionRemote::new();

        assert!(remote.get("9").await.unwrap_err().is_not_found());
        assert!(remote.update(&Position::new("9", "Ghost")).await.unwrap_err().is_not_found());
        assert!(remote.delete("9").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_seeded_ids_continue() {
        let remote = InMemoryPositionRemote::with_positions(vec![
            Position::new("4", "A"),
            Position::new("x", "B"),
        ]);

        let created = remote.create(&PositionDraft::new("C")).await.unwrap();

        assert_eq!(created.id, "5");
    }

    #[tokio::test]
    async fn test_fail_next_applies_once() {
        let remote = InMemoryPositionRemote::new();
        remote.fail_next(RemoteError::Network("offline".to_string()));

        assert!(remote.list().await.is_err());
        assert!(remote.list().await.is_ok());
    }
}
