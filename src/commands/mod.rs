//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `docx-compose` command-line tool, one file per subcommand.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `docx_compose` library.

pub mod compose;
pub mod tree;
pub mod validate;
