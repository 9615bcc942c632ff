pub mod event;
pub mod workout;
