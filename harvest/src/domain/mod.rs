mod catalog;
mod date_format;
mod draft;
mod entry;
mod metrics;
mod source;
mod table;
mod week;

pub use catalog::*;
pub use date_format::*;
pub use draft::*;
pub use entry::*;
pub use metrics::*;
pub use source::*;
pub use table::*;
pub use week::*;
