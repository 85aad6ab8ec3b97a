mod extension_table;
mod signature_table;
mod upload_policy;

pub use extension_table::{ExtensionTable, DEFAULT_EXTENSION};
pub use signature_table::{ContentSignature, SignatureTable};
pub use upload_policy::{UploadPolicy, DEFAULT_MAX_UPLOAD_SIZE};
