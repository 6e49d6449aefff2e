//! Multi-document workspace, file-system abstraction, and cross-document
//! symbol index (spec §4.2).

pub mod cancellation;
pub mod document;
pub mod fs_provider;
pub mod index;
pub mod scope;
pub mod symbol;
pub mod workspace;

pub use cancellation::CancellationToken;
pub use document::{Document, DocumentKind, ImportEdge};
pub use fs_provider::{FileStat, FileSystemProvider, InMemoryFileSystemProvider, RealFileSystemProvider};
pub use index::{DocumentExports, IndexManager};
pub use scope::{ResolvedAction, ScopeProvider};
pub use symbol::ExportedAction;
pub use workspace::Workspace;
