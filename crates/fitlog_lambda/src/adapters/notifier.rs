use fitlog_core::notification::WorkoutNotification;

pub trait WorkoutNotifier {
    fn publish(&self, notification: &WorkoutNotification) -> Result<(), String>;
}
