//! PDF export tests

mod export;
