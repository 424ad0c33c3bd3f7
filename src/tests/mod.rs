//! Integration-level tests spanning the public API

mod property_tests;
