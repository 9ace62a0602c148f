//! Property-based tests for the Remote++ core library

mod actions_tests;
mod address_tests;
mod service_tests;
mod store_tests;
