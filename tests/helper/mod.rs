#![allow(dead_code)]

pub mod fetcher;

pub use fetcher::{StaticFetcher, checker_with, prefixes};
