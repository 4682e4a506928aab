//! Input acquisition: the bundled example, uploads, pasted text, and URLs

pub mod example;
pub mod file_loader;
pub mod http_loader;
pub mod source;

pub use example::{EXAMPLE_SPEC, example_spec};
pub use file_loader::{FileSpecLoader, UPLOAD_EXTENSIONS, UploadFingerprint};
pub use http_loader::{HttpSpecFetcher, MAX_URL_LENGTH, validate_url};
pub use source::{SpecSource, validate_text};
