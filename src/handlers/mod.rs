// handlers/mod.rs
//
// public:   service endpoints (/, /health) and the route-not-found fallback
// resource: the generic CRUD handler set mounted once per entity under /api
pub mod public;
pub mod resource;

pub use public::*;
pub use resource::ResourceState;
