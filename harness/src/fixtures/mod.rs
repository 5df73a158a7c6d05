pub mod loader;
pub mod store;
pub mod types;

pub use loader::load_fixtures;
pub use store::FixtureStore;
pub use types::{CourseRecord, FixtureError, Student};
