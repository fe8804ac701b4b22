pub mod domain;
mod pipeline;
mod ports;
pub mod report;
mod sheet_client;
mod telegram;
mod workbench;

pub use pipeline::*;
pub use ports::*;
pub use sheet_client::*;
pub use telegram::*;
pub use workbench::*;
