//! URL handling module for Sitewalk
//!
//! This module provides origin resolution, href-to-link resolution,
//! same-host scoping, query stripping and canonical URL resolution.

mod normalize;
mod origin;

pub use normalize::{resolve_canonical, resolve_href, scope_link, strip_query};
pub use origin::Origin;
