pub mod csv_output;
pub mod gbif_matcher;
pub mod sheet_writer;
pub mod source;
