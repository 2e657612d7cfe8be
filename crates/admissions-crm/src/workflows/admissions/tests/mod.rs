mod common;
mod detail;
mod filter;
