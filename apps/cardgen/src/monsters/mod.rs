// Monster data collaborator.
// Reads the bestiary export, translates coded fields and attaches illustrations.

pub mod images;
pub mod loader;
pub mod tables;

pub use images::ImageIndex;
pub use loader::MonsterLoader;
pub use tables::LookupTables;
