//! Pieces shared by the command-line binary

pub mod args;
pub mod init;
