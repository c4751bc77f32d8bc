//! YAML-per-record persistent store
//!
//! Layout under the storage root:
//!
//! ```text
//! categories/<category-id>.yaml
//! tickets/<ticket-id>.yaml
//! comments/<ticket-id>.yaml     # whole thread, in insertion order
//! ```
//!
//! Every mutation runs under the exclusive store lock (`<root>/.lock`), which
//! is shared by every handle and every process on the same root. Clones of a
//! handle additionally queue on an in-process mutex before touching the lock
//! file. Every file is replaced through a uniquely named temp file and a
//! rename, so readers see either the old or the new record.

use super::lock::{LOCK_FILE, LOCK_TIMEOUT, StoreLock};
use super::repository::{CategoryRepository, CommentRepository, TicketRepository};
use crate::core::{Category, CategoryId, Comment, Ticket, TicketId};
use crate::error::{HelpdeskError, Result};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tempfile::NamedTempFile;
use tracing::debug;

const CATEGORIES_DIR: &str = "categories";
const TICKETS_DIR: &str = "tickets";
const COMMENTS_DIR: &str = "comments";

/// Held for the duration of one mutation; field order releases the lock file
/// before the in-process mutex
struct WriteGuard<'a> {
    _store: StoreLock,
    _local: MutexGuard<'a, ()>,
}

/// File-backed record store
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Create a storage handle rooted at `root`
    ///
    /// Clones share an in-process queue; separate handles and processes on
    /// the same root are serialized by the lock file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Storage root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directories if missing
    pub fn init(&self) -> Result<()> {
        for dir in [CATEGORIES_DIR, TICKETS_DIR, COMMENTS_DIR] {
            fs::create_dir_all(self.root.join(dir))?;
        }
        debug!("Initialized storage at {}", self.root.display());
        Ok(())
    }

    /// Whether `init` has been run for this root
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        [CATEGORIES_DIR, TICKETS_DIR, COMMENTS_DIR]
            .iter()
            .all(|dir| self.root.join(dir).is_dir())
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(HelpdeskError::StorageNotInitialized(self.root.clone()))
        }
    }

    fn lock(&self) -> Result<WriteGuard<'_>> {
        self.ensure_initialized()?;
        // The guarded data is `()`, so a poisoned lock carries no broken state
        let local = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let store = StoreLock::acquire(&self.root.join(LOCK_FILE), LOCK_TIMEOUT)?;
        Ok(WriteGuard {
            _store: store,
            _local: local,
        })
    }

    fn category_path(&self, id: &CategoryId) -> PathBuf {
        self.root.join(CATEGORIES_DIR).join(format!("{id}.yaml"))
    }

    fn ticket_path(&self, id: &TicketId) -> PathBuf {
        self.root.join(TICKETS_DIR).join(format!("{id}.yaml"))
    }

    fn comments_path(&self, id: &TicketId) -> PathBuf {
        self.root.join(COMMENTS_DIR).join(format!("{id}.yaml"))
    }

    fn read_category(&self, id: &CategoryId) -> Result<Category> {
        read_record(&self.category_path(id))?.ok_or_else(|| HelpdeskError::not_found("Category", id))
    }

    fn read_ticket(&self, id: &TicketId) -> Result<Ticket> {
        read_record(&self.ticket_path(id))?.ok_or_else(|| HelpdeskError::not_found("Ticket", id))
    }

    fn read_thread(&self, id: &TicketId) -> Result<Vec<Comment>> {
        Ok(read_record(&self.comments_path(id))?.unwrap_or_default())
    }

    fn ensure_unique_name(&self, category: &Category) -> Result<()> {
        if self.category_name_taken(&category.name, Some(&category.id))? {
            return Err(HelpdeskError::validation(
                "category with this name already exists.",
            ));
        }
        Ok(())
    }
}

impl CategoryRepository for FileStorage {
    fn insert_category(&self, category: &Category) -> Result<()> {
        let _guard = self.lock()?;
        self.ensure_unique_name(category)?;
        write_record(&self.category_path(&category.id), category)
    }

    fn load_category(&self, id: &CategoryId) -> Result<Category> {
        self.ensure_initialized()?;
        self.read_category(id)
    }

    fn load_all_categories(&self) -> Result<Vec<Category>> {
        self.ensure_initialized()?;
        let mut categories: Vec<Category> = read_dir_records(&self.root.join(CATEGORIES_DIR))?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn update_category<F>(&self, id: &CategoryId, update: F) -> Result<Category>
    where
        F: FnOnce(&mut Category) -> Result<()>,
    {
        let _guard = self.lock()?;
        let mut category = self.read_category(id)?;
        update(&mut category)?;
        category.id = *id;
        self.ensure_unique_name(&category)?;
        write_record(&self.category_path(id), &category)?;
        Ok(category)
    }

    fn delete_category(&self, id: &CategoryId) -> Result<()> {
        let _guard = self.lock()?;
        let category = self.read_category(id)?;

        let referencing = read_dir_records::<Ticket>(&self.root.join(TICKETS_DIR))?
            .iter()
            .filter(|ticket| ticket.category == *id)
            .count();
        if referencing > 0 {
            return Err(HelpdeskError::integrity(format!(
                "Cannot delete category '{}': it is referenced by {referencing} ticket(s).",
                category.name
            )));
        }

        fs::remove_file(self.category_path(id))?;
        Ok(())
    }

    fn category_name_taken(&self, name: &str, except: Option<&CategoryId>) -> Result<bool> {
        self.ensure_initialized()?;
        Ok(read_dir_records::<Category>(&self.root.join(CATEGORIES_DIR))?
            .iter()
            .any(|other| Some(&other.id) != except && other.name == name))
    }
}

impl TicketRepository for FileStorage {
    fn insert_ticket(&self, ticket: &Ticket) -> Result<()> {
        let _guard = self.lock()?;
        if !self.category_path(&ticket.category).is_file() {
            return Err(HelpdeskError::validation(format!(
                "Invalid category reference: {}",
                ticket.category
            )));
        }
        write_record(&self.ticket_path(&ticket.id), ticket)
    }

    fn load_ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.ensure_initialized()?;
        self.read_ticket(id)
    }

    fn load_all_tickets(&self) -> Result<Vec<Ticket>> {
        self.ensure_initialized()?;
        let mut tickets: Vec<Ticket> = read_dir_records(&self.root.join(TICKETS_DIR))?;
        tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tickets)
    }

    fn update_ticket<F>(&self, id: &TicketId, update: F) -> Result<Ticket>
    where
        F: FnOnce(&mut Ticket) -> Result<()>,
    {
        let _guard = self.lock()?;
        let mut ticket = self.read_ticket(id)?;
        let created_by = ticket.created_by;
        let created_at = ticket.created_at;

        update(&mut ticket)?;

        if !self.category_path(&ticket.category).is_file() {
            return Err(HelpdeskError::validation(format!(
                "Invalid category reference: {}",
                ticket.category
            )));
        }
        ticket.id = *id;
        ticket.created_by = created_by;
        ticket.created_at = created_at;
        ticket.updated_at = Utc::now();

        write_record(&self.ticket_path(id), &ticket)?;
        Ok(ticket)
    }

    fn delete_ticket(&self, id: &TicketId) -> Result<()> {
        let _guard = self.lock()?;
        self.read_ticket(id)?;

        remove_if_exists(&self.comments_path(id))?;
        fs::remove_file(self.ticket_path(id))?;
        Ok(())
    }
}

impl CommentRepository for FileStorage {
    fn append_comment(&self, comment: &Comment) -> Result<()> {
        let _guard = self.lock()?;
        self.read_ticket(&comment.ticket)?;

        let mut thread = self.read_thread(&comment.ticket)?;
        thread.push(comment.clone());
        write_record(&self.comments_path(&comment.ticket), &thread)
    }

    fn load_comments(&self, ticket: &TicketId) -> Result<Vec<Comment>> {
        self.ensure_initialized()?;
        let mut thread = self.read_thread(ticket)?;
        // stable: equal timestamps keep insertion order
        thread.sort_by_key(|comment| comment.created_at);
        Ok(thread)
    }
}

/// Read a YAML record, returning `None` when the file does not exist
fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_yaml::from_str(&content)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read every `*.yaml` record in a directory
fn read_dir_records<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "yaml") {
            if let Some(record) = read_record(&path)? {
                records.push(record);
            }
        }
    }
    Ok(records)
}

/// Replace a record atomically via temp file and rename
fn write_record<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_yaml::to_string(value)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {}", path.display());
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Status, TicketBuilder, UserId};
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join(".helpdesk"));
        storage.init().unwrap();
        (temp_dir, storage)
    }

    fn create_category(storage: &FileStorage, name: &str) -> Category {
        let category = Category::new(name).unwrap();
        storage.insert_category(&category).unwrap();
        category
    }

    #[test]
    fn test_uninitialized_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("missing"));
        assert!(!storage.is_initialized());
        assert!(matches!(
            storage.load_all_tickets(),
            Err(HelpdeskError::StorageNotInitialized(_))
        ));
    }

    #[test]
    fn test_ticket_save_and_load() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Network");
        let ticket = TicketBuilder::new().category(category.id).build();

        storage.insert_ticket(&ticket).unwrap();
        let loaded = storage.load_ticket(&ticket.id).unwrap();
        assert_eq!(loaded, ticket);
    }

    #[test]
    fn test_ticket_requires_existing_category() {
        let (_temp_dir, storage) = create_storage();
        let ticket = TicketBuilder::new().build();

        let err = storage.insert_ticket(&ticket).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(storage.load_all_tickets().unwrap().is_empty());
    }

    #[test]
    fn test_missing_ticket_is_not_found() {
        let (_temp_dir, storage) = create_storage();
        let err = storage.load_ticket(&TicketId::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_ticket_stamps_and_protects_fields() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Hardware");
        let creator = UserId::new();
        let ticket = TicketBuilder::new()
            .category(category.id)
            .created_by(creator)
            .build();
        storage.insert_ticket(&ticket).unwrap();

        let updated = storage
            .update_ticket(&ticket.id, |t| {
                t.status = Status::InProgress;
                t.created_by = UserId::new();
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.status, Status::InProgress);
        assert_eq!(updated.created_by, creator);
        assert!(updated.updated_at >= ticket.updated_at);
        assert_eq!(storage.load_ticket(&ticket.id).unwrap(), updated);
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Access");
        let ticket = TicketBuilder::new().category(category.id).build();
        storage.insert_ticket(&ticket).unwrap();

        let result = storage.update_ticket(&ticket.id, |t| {
            t.status = Status::Closed;
            Err(HelpdeskError::validation("nope"))
        });

        assert!(result.is_err());
        assert_eq!(storage.load_ticket(&ticket.id).unwrap(), ticket);
    }

    #[test]
    fn test_tickets_ordered_by_creation() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Email");
        let now = Utc::now();
        let later = TicketBuilder::new()
            .category(category.id)
            .created_at(now + chrono::Duration::seconds(5))
            .build();
        let earlier = TicketBuilder::new().category(category.id).created_at(now).build();

        storage.insert_ticket(&later).unwrap();
        storage.insert_ticket(&earlier).unwrap();

        let ids: Vec<_> = storage
            .load_all_tickets()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![earlier.id, later.id]);
    }

    #[test]
    fn test_category_names_are_unique() {
        let (_temp_dir, storage) = create_storage();
        create_category(&storage, "Billing");

        let duplicate = Category::new("Billing").unwrap();
        let err = storage.insert_category(&duplicate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let other = create_category(&storage, "Sales");
        let err = storage
            .update_category(&other.id, |c| {
                c.name = "Billing".to_string();
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(storage.load_category(&other.id).unwrap().name, "Sales");
    }

    #[test]
    fn test_category_name_taken() {
        let (_temp_dir, storage) = create_storage();
        let billing = create_category(&storage, "Billing");

        assert!(storage.category_name_taken("Billing", None).unwrap());
        assert!(!storage.category_name_taken("Billing", Some(&billing.id)).unwrap());
        assert!(!storage.category_name_taken("Sales", None).unwrap());

        let renamed = storage
            .update_category(&billing.id, |c| {
                c.is_active = false;
                Ok(())
            })
            .unwrap();
        assert_eq!(renamed.name, "Billing");
    }

    #[test]
    fn test_categories_sorted_by_name() {
        let (_temp_dir, storage) = create_storage();
        create_category(&storage, "Zeta");
        create_category(&storage, "Alpha");

        let names: Vec<_> = storage
            .load_all_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_referenced_category_is_protected() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Software");
        let ticket = TicketBuilder::new().category(category.id).build();
        storage.insert_ticket(&ticket).unwrap();

        let err = storage.delete_category(&category.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Integrity);
        assert!(storage.load_category(&category.id).is_ok());

        storage.delete_ticket(&ticket.id).unwrap();
        storage.delete_category(&category.id).unwrap();
        let err = storage.load_category(&category.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_ticket_delete_cascades_to_comments() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Facilities");
        let ticket = TicketBuilder::new().category(category.id).build();
        storage.insert_ticket(&ticket).unwrap();

        let comment = Comment::new(ticket.id, UserId::new(), "on it").unwrap();
        storage.append_comment(&comment).unwrap();
        assert_eq!(storage.load_comments(&ticket.id).unwrap().len(), 1);

        storage.delete_ticket(&ticket.id).unwrap();
        assert!(storage.load_comments(&ticket.id).unwrap().is_empty());
        assert!(!storage.comments_path(&ticket.id).exists());
    }

    #[test]
    fn test_comments_in_order() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "General");
        let ticket = TicketBuilder::new().category(category.id).build();
        storage.insert_ticket(&ticket).unwrap();

        for body in ["first", "second", "third"] {
            let comment = Comment::new(ticket.id, UserId::new(), body).unwrap();
            storage.append_comment(&comment).unwrap();
        }

        let bodies: Vec<_> = storage
            .load_comments(&ticket.id)
            .unwrap()
            .into_iter()
            .map(|c| c.body)
            .collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_comment_on_missing_ticket() {
        let (_temp_dir, storage) = create_storage();
        let comment = Comment::new(TicketId::new(), UserId::new(), "hello").unwrap();
        let err = storage.append_comment(&comment).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Queue");
        let ticket = TicketBuilder::new().category(category.id).build();
        storage.insert_ticket(&ticket).unwrap();

        let claimers: Vec<_> = (0..8)
            .map(|_| {
                let storage = storage.clone();
                let id = ticket.id;
                std::thread::spawn(move || {
                    let me = UserId::new();
                    storage.update_ticket(&id, |t| {
                        if t.assigned_to.is_some() {
                            return Err(HelpdeskError::conflict("taken"));
                        }
                        t.assigned_to = Some(me);
                        Ok(())
                    })
                })
            })
            .collect();

        let winners = claimers
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|result| result.is_ok())
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn test_separate_handles_serialize_claims() {
        let (temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Shared");
        let ticket = TicketBuilder::new().category(category.id).build();
        storage.insert_ticket(&ticket).unwrap();

        let root = temp_dir.path().join(".helpdesk");
        let barrier = std::sync::Arc::new(std::sync::Barrier::new(8));
        let claimers: Vec<_> = (0..8)
            .map(|_| {
                // A fresh handle per thread shares nothing but the root
                let storage = FileStorage::new(&root);
                let barrier = barrier.clone();
                let id = ticket.id;
                std::thread::spawn(move || {
                    let me = UserId::new();
                    barrier.wait();
                    storage
                        .update_ticket(&id, |t| {
                            if t.assigned_to.is_some() {
                                return Err(HelpdeskError::conflict("taken"));
                            }
                            t.assigned_to = Some(me);
                            Ok(())
                        })
                        .map(|_| me)
                })
            })
            .collect();

        let winners: Vec<_> = claimers
            .into_iter()
            .filter_map(|handle| handle.join().unwrap().ok())
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(
            storage.load_ticket(&ticket.id).unwrap().assigned_to,
            Some(winners[0])
        );
    }

    #[test]
    fn test_writes_leave_no_temp_files() {
        let (_temp_dir, storage) = create_storage();
        let category = create_category(&storage, "Tidy");
        let ticket = TicketBuilder::new().category(category.id).build();
        storage.insert_ticket(&ticket).unwrap();
        for _ in 0..3 {
            storage.update_ticket(&ticket.id, |_| Ok(())).unwrap();
        }

        let entries: Vec<_> = fs::read_dir(storage.root().join(TICKETS_DIR))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(format!("{}.yaml", ticket.id))]);
    }
}
