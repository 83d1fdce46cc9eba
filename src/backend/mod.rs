//! Backend client module for the hosted V-Fire service

mod client;
mod traits;

pub use client::BackendClient;
pub use traits::{BackendError, FileStore, RecordStore, SessionProvider};

#[cfg(test)]
pub use traits::{MockFileStore, MockRecordStore, MockSessionProvider};
