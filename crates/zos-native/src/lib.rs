//! Native z/OS collaborator interface.
//!
//! The REST layer talks to data sets, z/OS UNIX files and JES exclusively
//! through [`NativeBackend`]. Results come back as loosely-typed records
//! whose attributes are all optional.
//!
//! [`MemoryBackend`] is a complete in-memory implementation used by the
//! standalone server and by tests.

pub mod backend;
pub mod error;
pub mod memory;
pub mod records;

pub use backend::NativeBackend;
pub use error::{NativeError, NativeResult};
pub use memory::{content_etag, MemoryBackend};
pub use records::{DataSetAttributes, DataSetEntry, JobEntry, MemberEntry, SpoolFileEntry};
