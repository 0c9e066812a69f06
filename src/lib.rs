//! The library code for the `jotter` journal generator. A journal is a tree
//! of dated markdown entries whose shape is fixed by its [`cadence`] (daily,
//! weekly, or monthly). The architecture breaks down into a few steps:
//!
//! 1. Scaffolding a project ([`crate::scaffold`]) and adding entries to it
//!    ([`crate::entry`]).
//! 2. Mapping each content path to its output path and date fields
//!    ([`crate::layout`]).
//! 3. Walking the content tree, converting each entry to HTML, and rendering
//!    post pages and the index ([`crate::build`], [`crate::markdown`],
//!    [`crate::render`]).
//! 4. Writing the result to the publish directory, or to a temporary
//!    directory served locally ([`crate::publish`]).
//!
//! Nothing is cached between runs: posts are rebuilt from the content tree on
//! every invocation, and the loaded [`config::Config`] is passed explicitly to
//! every step.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod cadence;
pub mod config;
pub mod entry;
pub mod layout;
pub mod markdown;
pub mod post;
pub mod project;
pub mod publish;
pub mod render;
pub mod scaffold;
mod util;
