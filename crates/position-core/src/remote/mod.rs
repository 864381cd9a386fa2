//! Remote Collaborator
//!
//! Defines the abstract interface to the positions REST resource.
//! Implementations can use HTTP, in-memory, etc.

mod http;
mod memory;

use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::{Position, PositionDraft};
use crate::error::RemoteResult;

pub use http::HttpPositionRemote;
pub use memory::InMemoryPositionRemote;

/// CRUD access to the positions resource
///
/// Futures are `?Send`: in the browser they run on the single JS thread.
#[async_trait(?Send)]
pub trait PositionRemote {
    /// `GET /positions`
    async fn list(&self) -> RemoteResult<Vec<Position>>;

    /// `GET /positions/{id}`
    async fn get(&self, id: &str) -> RemoteResult<Position>;

    /// `POST /positions`, the backend assigns the id
    async fn create(&self, draft: &PositionDraft) -> RemoteResult<Position>;

    /// `PUT /positions/{id}` with the full record
    async fn update(&self, position: &Position) -> RemoteResult<Position>;

    /// `DELETE /positions/{id}`
    async fn delete(&self, id: &str) -> RemoteResult<()>;
}

#[async_trait(?Send)]
impl<R: PositionRemote + ?Sized> PositionRemote for Rc<R> {
    async fn list(&self) -> RemoteResult<Vec<Position>> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> RemoteResult<Position> {
        (**self).get(id).await
    }

    async fn create(&self, draft: &PositionDraft) -> RemoteResult<Position> {
        (**self).create(draft).await
    }

    async fn update(&self, position: &Position) -> RemoteResult<Position> {
        (**self).update(position).await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        (**self).delete(id).await
    }
}

#[async_trait(?Send)]
impl<R: PositionRemote + ?Sized> PositionRemote for Box<R> {
    async fn list(&self) -> RemoteResult<Vec<Position>> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> RemoteResult<Position> {
        (**self).get(id).await
    }

    async fn create(&self, draft: &PositionDraft) -> RemoteResult<Position> {
        (**self).create(draft).await
    }

    async fn update(&self, position: &Position) -> RemoteResult<Position> {
        (**self).update(position).await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        (**self).delete(id).await
    }
}
