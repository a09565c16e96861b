//! File management for filevault.
//!
//! - `types`: record, id and parent types
//! - `storage`: content bytes on local disk
//! - `metadata`: record persistence
//! - `service`: upload validation and owner-scoped reads

mod metadata;
mod service;
mod storage;
mod types;

pub use metadata::{FileRepository, PAGE_SIZE};
pub use service::{FileService, UploadError, UploadInput};
pub use storage::{FileStorage, StoreError};
pub use types::{FileId, FileRecord, FileType, FileTypeError, NewFileRecord, ParentRef};
