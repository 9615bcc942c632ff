use fitlog_core::storage_keys::WorkoutObject;

pub trait WorkoutStore {
    fn put_object(&self, object: &WorkoutObject) -> Result<(), String>;
}
