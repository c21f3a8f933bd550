pub mod layout;
pub mod probe;

pub use layout::{is_clean_component, AllowLists, RepoLayout};
pub use probe::{DiskProbe, FsProbe, MemoryProbe, ProbeError};
