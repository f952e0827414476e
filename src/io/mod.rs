pub mod compression;
pub mod report;

pub use compression::open_input;
