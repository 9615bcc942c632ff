use std::fmt::Display;

use rand::Rng;

use crate::contract::WorkoutEntry;

pub const MOTIVATIONAL_MESSAGES: [&str; 8] = [
    "Great workout! Keep pushing! 💪",
    "You're crushing it! Consistency is key! 🔥",
    "Workout logged! Your dedication is impressive! 🌟",
    "Another step closer to your goals! Keep it up! 🚀",
    "Fantastic effort! Your future self will thank you! 💯",
    "Beast mode activated! Well done! 🦁",
    "Progress over perfection! You're doing amazing! ⭐",
    "Every rep counts! Great job today! 🏋️",
];

const SUMMARY_RULE: &str = "━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutNotification {
    pub subject: String,
    pub message: String,
}

/// Uniform pick from the pool; the workout itself has no influence.
pub fn choose_motivation(rng: &mut impl Rng) -> &'static str {
    MOTIVATIONAL_MESSAGES[rng.gen_range(0..MOTIVATIONAL_MESSAGES.len())]
}

pub fn notification_subject(entry: &WorkoutEntry) -> String {
    format!("FitLog: Workout Logged - {}", entry.exercise)
}

pub fn compose_summary(entry: &WorkoutEntry, motivation: &str) -> String {
    let mut summary = format!(
        "\n{motivation}\n\nWorkout Details:\n{SUMMARY_RULE}\nExercise: {}\nSets: {}\nReps: {}\nWeight: {} lbs\nDate: {}\nTime: {}\n",
        entry.exercise,
        or_not_available(entry.sets),
        or_not_available(entry.reps),
        or_not_available(entry.weight),
        entry.date,
        entry.time,
    );

    if !entry.notes.is_empty() {
        summary.push_str(&format!("\nNotes: {}", entry.notes));
    }

    summary
}

pub fn compose_notification(entry: &WorkoutEntry, motivation: &str) -> WorkoutNotification {
    WorkoutNotification {
        subject: notification_subject(entry),
        message: compose_summary(entry, motivation),
    }
}

fn or_not_available(value: Option<impl Display>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
