pub mod files;
pub mod state;
pub mod storage;

pub use files::ensure_dir;
pub use state::{load_state, Persister};
pub use storage::FileStore;
