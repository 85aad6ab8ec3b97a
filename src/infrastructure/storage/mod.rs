mod bounded_read;
mod path_guard;
mod secure_file_store;

pub use bounded_read::BoundedRead;
pub use path_guard::PathGuard;
pub use secure_file_store::SecureFileStore;
