//! Local dataset ingestion

mod local_reader;

pub use local_reader::LocalDatasetReader;
