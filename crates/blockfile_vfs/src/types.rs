//! Shared types for the VFS capability surface.

/// The kind of file the engine is asking the VFS to open.
///
/// This adapter models a single logical file: only [`OpenKind::MainDb`] is
/// accepted; every other kind is declined without touching the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenKind {
    /// The main database file.
    MainDb,
    /// The rollback journal of the main database.
    MainJournal,
    /// A temporary database.
    TempDb,
    /// The journal of a temporary database.
    TempJournal,
    /// A transient, in-memory database.
    TransientDb,
    /// A statement sub-journal.
    SubJournal,
    /// A master journal for multi-database commits.
    MasterJournal,
}

impl OpenKind {
    /// Returns a short name for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainDb => "main_db",
            Self::MainJournal => "main_journal",
            Self::TempDb => "temp_db",
            Self::TempJournal => "temp_journal",
            Self::TransientDb => "transient_db",
            Self::SubJournal => "subjournal",
            Self::MasterJournal => "master_journal",
        }
    }
}

/// File lock levels, in escalating order.
///
/// The adapter performs no real locking; the levels exist so lock calls
/// can be logged and acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LockLevel {
    /// No lock held.
    None,
    /// Shared read lock.
    Shared,
    /// Reserved lock, announcing an intent to write.
    Reserved,
    /// Pending lock, waiting for readers to drain.
    Pending,
    /// Exclusive write lock.
    Exclusive,
}

/// What an access probe is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Does the file exist?
    Exists,
    /// Is the file readable and writable?
    ReadWrite,
    /// Is the file readable?
    ReadOnly,
}

/// Sync request flavors, mirroring the engine's sync flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Normal sync of file data.
    Normal,
    /// Full barrier sync.
    Full,
    /// Sync file data only, not file metadata.
    DataOnly,
}
