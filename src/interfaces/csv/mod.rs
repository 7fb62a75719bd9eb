pub mod draft_reader;
pub mod report_writer;
