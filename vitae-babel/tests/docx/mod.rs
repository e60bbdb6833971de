//! DOCX export tests

mod export;
