pub mod archiver;
pub mod request;
pub mod writer;

pub use archiver::{ExportArchive, Exporter};
pub use request::ExportRequest;
pub use writer::ExportWriter;
