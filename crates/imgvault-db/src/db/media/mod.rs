pub mod directory;
pub mod index;
#[allow(clippy::module_inception)]
pub mod media;
pub mod record;

pub use directory::DirectoryIndex;
pub use index::MetadataIndex;
pub use media::MediaRepository;
pub use record::MediaRecordRepository;
