mod auth;
mod library;
mod store;
mod volume;

pub use auth::TokenManager;
pub use library::ALBUMS_KEY;
pub use library::LibraryFilter;
pub use library::LibraryManager;
pub use library::PLAYLISTS_KEY;
pub use store::LibraryStore;
pub use store::StoreError;
pub use volume::VolumeMemory;
