#![cfg(test)]

pub mod common;
pub mod config_file_tests;
pub mod lifecycle_tests;
