//! Library crate backing the `rigsys` binary.
//!
//! Rig documents (the declarative JSON form of a rig) live in [`doc`];
//! each subcommand's implementation lives under [`commands`].

pub mod commands;
pub mod doc;
