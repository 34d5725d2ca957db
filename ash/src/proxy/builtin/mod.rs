//! Builtin command handlers that need shell-owned state.
//!
//! The thin builtins in `ash-builtin` forward here through
//! `ShellProxy::dispatch`.

pub mod jobs;
pub mod registry;
