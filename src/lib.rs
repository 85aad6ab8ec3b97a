//! # cover_vault - Secure Cover Uploads
//!
//! A small HTTP service that accepts cover images and PDFs and writes
//! them to a local upload directory only after they pass a fixed chain
//! of checks, built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Upload policy, entities, validation and domain errors
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: The secure file store and in-memory repositories
//! - **API**: HTTP handlers, problem-details errors and middleware
//!
//! ## Upload pipeline
//!
//! Every upload goes through the same gates, in order, and nothing is
//! written unless all of them pass:
//!
//! 1. Bounded read of at most `max_size + 1` bytes
//! 2. Content sniffing against the signature table
//! 3. Canonicalization of the upload directory
//! 4. A random UUID name with an extension taken from the policy
//! 5. Containment of the candidate path in the upload directory
//! 6. No symbolic link anywhere in the path's ancestry
//! 7. An exclusive (`create_new`) write
//!
//! ## Example Usage
//!
//! ```no_run
//! use cover_vault::{
//!     infrastructure::storage::SecureFileStore, ports::CoverStore,
//!     value_objects::UploadPolicy,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SecureFileStore::new("uploads".into(), UploadPolicy::default());
//! let stored = store
//!     .store(Box::pin(std::io::Cursor::new(b"%PDF-1.7".to_vec())))
//!     .await?;
//! println!("stored {}", stored.file_name());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
