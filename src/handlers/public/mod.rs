pub mod fallback;
pub mod health;
pub mod root;

pub use fallback::route_not_found;
pub use health::health;
pub use root::root;
