// file: src/scraper/mod.rs
// description: web page scraping through a markdown reader proxy
// reference: internal module structure

pub mod client;

pub use client::ReaderClient;
