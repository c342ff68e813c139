// Adapters layer: file-backed implementations of the domain ports.

pub mod attendance_log;
pub mod fence_file;
pub mod photo;

pub use attendance_log::JsonlAttendanceLog;
pub use fence_file::JsonFenceFile;
pub use photo::LocalPhotoStore;
