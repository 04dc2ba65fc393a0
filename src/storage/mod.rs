pub mod file;
pub mod models;

pub use file::FileStore;
pub use models::SessionRecord;
