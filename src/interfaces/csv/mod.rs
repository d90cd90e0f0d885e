pub mod history_writer;
pub mod session_reader;
