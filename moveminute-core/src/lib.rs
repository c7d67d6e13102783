pub mod activities;
pub mod config;
pub mod entry;
pub mod metrics;
pub mod record;
pub mod store;

pub use activities::{BASE_ACTIVITIES, activity_options};
pub use config::Config;
pub use entry::{ActivityEntry, NewEntry, OTHER_SENTINEL, ValidationError};
pub use store::{CsvStore, Store};
