pub mod compare;
pub mod histogram;
pub mod ingest;
pub mod transform;
