//! Load, inspect and batch-test OpenSceneGraph binary scene files.
//!
//! This crate wraps [`osgb_decode`] with file handling: a [`SceneFile`] owns
//! the bytes a decoded [`osgb_decode::Scene`] borrows from.
//!
//! # Key functions
//!
//! - [`SceneFile::open`]: Read a file fully into memory
//! - [`dump::write_scene`]: Pretty-print a decoded graph
//! - [`batch::run`]: Decode every matching file under a directory
//! - [`summary::summarize`]: JSON summary of one scene

mod error;
mod file;

pub mod batch;
pub mod dump;
pub mod summary;

#[cfg(test)]
mod test_util;

pub use error::{Error, Result};
pub use file::SceneFile;
pub use osgb_decode;
