//! Fetch adapter tests against a mockito server

mod client;
