//! HTML import tests (HTML → blocks)

mod import;
mod properties;
