pub mod notifier;
pub mod object_store;
