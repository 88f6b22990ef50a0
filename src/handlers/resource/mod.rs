// handlers/resource - generic CRUD handlers
//
// One handler set serves every entity. The router nests a copy of these routes
// under /api/<resource> with a ResourceState pointing at that entity's spec:
//
//   GET    /api/<resource>               list
//   GET    /api/<resource>/:id           show
//   GET    /api/<resource>/plan/:planId  by_plan (plan-scoped resources only)
//   POST   /api/<resource>               create
//   PUT    /api/<resource>/:id           update
//   DELETE /api/<resource>/:id           delete

use crate::database::Database;
use crate::resources::ResourceSpec;

pub mod by_plan;
pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;
pub mod utils;

pub use by_plan::by_plan as resource_by_plan;
pub use create::create as resource_create;
pub use delete::delete as resource_delete;
pub use list::list as resource_list;
pub use show::show as resource_show;
pub use update::update as resource_update;

/// Router state for one nested resource
#[derive(Debug, Clone)]
pub struct ResourceState {
    pub db: Database,
    pub spec: &'static ResourceSpec,
}
