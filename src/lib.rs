//! The library code for the `pagewright` site pipeline. Given the metadata of
//! every authored item, it works out which pages a blog must have and what
//! data each of them needs. It never renders anything; the result is a list of
//! [`page::PageDescriptor`]s for a rendering layer to consume.
//!
//! The pipeline has three stages:
//!
//! 1. Normalizing the records from a [`source::ContentSource`]
//!    ([`crate::normalize`]): posts only, newest first, each with the slug
//!    resolved from its storage path ([`crate::resolve`]).
//! 2. Deriving the page groups from the normalized posts. These are
//!    independent of one another:
//!    * neighbor links for each post page ([`crate::neighbor`]),
//!    * the paginated archive ([`crate::paginate`]),
//!    * one index page per distinct category and tag ([`crate::taxonomy`]).
//! 3. Merging the groups into descriptors and rejecting any two pages that
//!    share a path ([`crate::emit`]).
//!
//! [`build::build_site`] runs all three; [`write`] serializes the result.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod emit;
pub mod neighbor;
pub mod normalize;
pub mod page;
pub mod paginate;
pub mod record;
pub mod resolve;
pub mod source;
pub mod taxonomy;
pub mod write;

mod util;
