pub mod base;
pub mod csv_file;
pub mod arrow_store;
pub mod remote;
