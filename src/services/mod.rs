pub mod paper_service;
pub mod warn_writer;

pub use paper_service::{PaperService, PaperSubmission, SubmittedPage};
pub use warn_writer::WarnWriter;
