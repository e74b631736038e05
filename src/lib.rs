//! Terminal-to-editor bridge over two files in the repository root.
//!
//! A CLI invocation writes a JSON command file, the editor extension answers
//! with a JSON result file, and the CLI renders the answer. Two variants
//! (`claude-helper`, `gitlens-cli`) share this protocol and differ only in
//! file names and the commands they accept.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
