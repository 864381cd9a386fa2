//! Position Store
//!
//! Canonical flat list of positions plus the current selection.
//! Local state only changes after the remote collaborator confirms a call.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::future::{poll_fn, Future};
use std::pin::pin;
use std::task::Poll;
use std::rc::Rc;

use crate::domain::{Position, PositionDraft};
use crate::error::{RemoteError, RemoteResult};
use crate::remote::PositionRemote;
use crate::tree::{build_tree, compare_titles, descendant_ids, TreeNode};

/// Which mutation was dispatched, for UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

// ========================
// State
// ========================

/// Plain state value; every mutator below is one confirmed transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionState {
    /// Insertion order as received/updated
    pub positions: Vec<Position>,
    pub selected_position: Option<Position>,
}

impl PositionState {
    pub fn all_positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn selected_position(&self) -> Option<&Position> {
        self.selected_position.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub fn tree_nodes(&self) -> Vec<TreeNode> {
        build_tree(&self.positions)
    }

    /// Positions that may become the parent of `editing`, sorted by name.
    ///
    /// Excludes `editing` itself and everything below it.
    pub fn parent_candidates(&self, editing: Option<&str>) -> Vec<&Position> {
        let excluded: HashSet<String> = match editing {
            Some(id) => {
                let mut ids = descendant_ids(&self.positions, id);
                ids.insert(id.to_string());
                ids
            }
            None => HashSet::new(),
        };

        let mut candidates: Vec<&Position> = self
            .positions
            .iter()
            .filter(|p| !excluded.contains(&p.id))
            .collect();
        candidates.sort_by(|a, b| compare_titles(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
        candidates
    }

    pub fn replace_all(&mut self, positions: Vec<Position>) {
        self.positions = positions;
    }

    pub fn select(&mut self, position: Position) {
        self.selected_position = Some(position);
    }

    pub fn clear_selection(&mut self) {
        self.selected_position = None;
    }

    pub fn append(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Replace the record with the same id, keeping its place in the list.
    /// Returns false (and changes nothing) when no such record exists.
    pub fn replace(&mut self, updated: Position) -> bool {
        let Some(slot) = self.positions.iter_mut().find(|p| p.id == updated.id) else {
            return false;
        };
        if self.selected_position.as_ref().is_some_and(|s| s.id == updated.id) {
            self.selected_position = Some(updated.clone());
        }
        *slot = updated;
        true
    }

    /// Remove the record with `id`. Returns false when it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.positions.len();
        self.positions.retain(|p| p.id != id);
        if self.selected_position.as_ref().is_some_and(|s| s.id == id) {
            self.selected_position = None;
        }
        self.positions.len() != before
    }
}

// ========================
// Store
// ========================

pub type Notifier = Box<dyn Fn(MutationKind)>;

/// State container around a remote collaborator.
///
/// Operations are not serialized against each other: whichever response
/// completes last decides the final state. No `RefCell` borrow is held across
/// an `.await`, so interleaved operations never observe a half-applied change.
/// Dropping an operation future before it resolves leaves the state untouched.
pub struct PositionStore<R> {
    remote: R,
    state: RefCell<PositionState>,
    /// Bumped on every applied change
    revision: Cell<u64>,
    tree_cache: RefCell<Option<(u64, Rc<Vec<TreeNode>>)>>,
    notifier: Option<Notifier>,
}

impl<R: PositionRemote> PositionStore<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            state: RefCell::new(PositionState::default()),
            revision: Cell::new(0),
            tree_cache: RefCell::new(None),
            notifier: None,
        }
    }

    /// Called once a create/update/delete request has been sent, before its response
    pub fn with_notifier(mut self, notifier: impl Fn(MutationKind) + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    // ========================
    // Read projections
    // ========================

    pub fn all_positions(&self) -> Vec<Position> {
        self.state.borrow().positions.clone()
    }

    pub fn selected_position(&self) -> Option<Position> {
        self.state.borrow().selected_position.clone()
    }

    pub fn find(&self, id: &str) -> Option<Position> {
        self.state.borrow().find(id).cloned()
    }

    pub fn snapshot(&self) -> PositionState {
        self.state.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Forest for the current positions; rebuilt only after a change
    pub fn tree_node(&self) -> Rc<Vec<TreeNode>> {
        let revision = self.revision.get();
        if let Some((built_at, tree)) = self.tree_cache.borrow().as_ref() {
            if *built_at == revision {
                return Rc::clone(tree);
            }
        }

        let tree = Rc::new(self.state.borrow().tree_nodes());
        *self.tree_cache.borrow_mut() = Some((revision, Rc::clone(&tree)));
        tree
    }

    pub fn parent_candidates(&self, editing: Option<&str>) -> Vec<Position> {
        self.state
            .borrow()
            .parent_candidates(editing)
            .into_iter()
            .cloned()
            .collect()
    }

    // ========================
    // Local selection
    // ========================

    /// Select an already loaded position without a round trip
    pub fn select_local(&self, id: &str) -> Option<Position> {
        let found = self.find(id)?;
        self.apply(|state| state.select(found.clone()));
        Some(found)
    }

    pub fn clear_selection(&self) {
        if self.state.borrow().selected_position.is_some() {
            self.apply(PositionState::clear_selection);
        }
    }

    // ========================
    // Remote operations
    // ========================

    /// Load the full collection, replacing the local list
    pub async fn fetch_all(&self) -> RemoteResult<()> {
        let positions = self.remote.list().await.map_err(|e| failed("fetch_all", e))?;
        log::debug!("[STORE] Loaded {} positions", positions.len());
        self.apply(|state| state.replace_all(positions));
        Ok(())
    }

    /// Load one record and make it the selection
    pub async fn fetch_one(&self, id: &str) -> RemoteResult<Position> {
        let position = self.remote.get(id).await.map_err(|e| failed("fetch_one", e))?;
        self.apply(|state| state.select(position.clone()));
        Ok(position)
    }

    /// Create a position; the confirmed record is appended last
    pub async fn create(&self, draft: PositionDraft) -> RemoteResult<Position> {
        let created = self
            .send(MutationKind::Create, self.remote.create(&draft))
            .await
            .map_err(|e| failed("create", e))?;
        log::debug!("[STORE] Created position {}", created.id);
        self.apply(|state| state.append(created.clone()));
        Ok(created)
    }

    /// Update a position in place. A confirmed record whose id is not in the
    /// local list is ignored.
    pub async fn update(&self, position: Position) -> RemoteResult<Position> {
        let updated = self
            .send(MutationKind::Update, self.remote.update(&position))
            .await
            .map_err(|e| failed("update", e))?;
        let mut replaced = false;
        self.apply_if(|state| {
            replaced = state.replace(updated.clone());
            replaced
        });
        if !replaced {
            log::debug!("[STORE] Updated position {} is not loaded locally, ignoring", updated.id);
        }
        Ok(updated)
    }

    /// Delete a position; children left behind show up as roots
    pub async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.send(MutationKind::Delete, self.remote.delete(id))
            .await
            .map_err(|e| failed("delete", e))?;
        log::debug!("[STORE] Deleted position {}", id);
        self.apply_if(|state| state.remove(id));
        Ok(())
    }

    // ========================
    // Helpers
    // ========================

    /// Start the request, notify, then wait for the response
    async fn send<T>(&self, kind: MutationKind, request: impl Future<Output = RemoteResult<T>>) -> RemoteResult<T> {
        let mut request = pin!(request);
        let first = poll_fn(|cx| Poll::Ready(request.as_mut().poll(cx))).await;
        self.notify(kind);
        match first {
            Poll::Ready(result) => result,
            Poll::Pending => request.await,
        }
    }

    fn notify(&self, kind: MutationKind) {
        if let Some(notifier) = &self.notifier {
            notifier(kind);
        }
    }

    fn apply(&self, change: impl FnOnce(&mut PositionState)) {
        self.apply_if(|state| {
            change(state);
            true
        });
    }

    /// Run `change` and bump the revision when it reports a change
    fn apply_if(&self, change: impl FnOnce(&mut PositionState) -> bool) {
        let mut state = self.state.borrow_mut();
        let changed = change(&mut *state);
        drop(state);
        if changed {
            self.revision.set(self.revision.get() + 1);
        }
    }
}

fn failed(operation: &str, err: RemoteError) -> RemoteError {
    log::warn!("[STORE] {} failed: {}", operation, err);
    err
}
