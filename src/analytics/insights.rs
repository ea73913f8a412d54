use crate::analytics::records::{PersonalRecord, personal_records};
use crate::analytics::{busiest_weekday, longest_streak, round1, training_days};
use crate::domain::workout::Workout;
use chrono::Weekday;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingInsights {
    pub total_workouts: usize,
    pub total_volume: f64,
    pub average_volume: f64,
    pub most_trained_exercise: Option<String>,
    pub strongest_lift: Option<PersonalRecord>,
    #[serde(serialize_with = "crate::analytics::weekday_name::serialize")]
    pub favorite_day: Option<Weekday>,
    pub longest_streak: u32,
    pub workouts_per_week: f64,
}

/// Whole-history insights, or `None` when nothing has been logged.
pub fn generate_training_insights(workouts: &[Workout]) -> Option<TrainingInsights> {
    if workouts.is_empty() {
        return None;
    }

    let total_workouts = workouts.len();
    let total_volume: f64 = workouts.iter().map(|w| w.total_weight).sum();
    let days = training_days(workouts);

    let workouts_per_week = match (days.first(), days.last()) {
        (Some(first), Some(last)) => {
            let span_days = (*last - *first).num_days() + 1;
            let weeks = (span_days as f64 / 7.0).max(1.0);
            round1(total_workouts as f64 / weeks)
        }
        _ => 0.0,
    };

    Some(TrainingInsights {
        total_workouts,
        total_volume,
        average_volume: round1(total_volume / total_workouts as f64),
        most_trained_exercise: most_trained_exercise(workouts),
        strongest_lift: strongest_lift(personal_records(workouts)),
        favorite_day: busiest_weekday(workouts),
        longest_streak: longest_streak(&days),
        workouts_per_week,
    })
}

/// Exercise with the most logged sets. Names compare case-insensitively and
/// ties go to the alphabetically first name.
fn most_trained_exercise(workouts: &[Workout]) -> Option<String> {
    let mut sets_per_exercise: BTreeMap<String, (usize, String)> = BTreeMap::new();
    for exercise in workouts.iter().flat_map(|w| &w.exercises) {
        let entry = sets_per_exercise
            .entry(exercise.name.trim().to_lowercase())
            .or_insert_with(|| (0, exercise.name.trim().to_string()));
        entry.0 += exercise.sets.len();
    }

    let mut best: Option<(usize, String)> = None;
    for (count, name) in sets_per_exercise.into_values() {
        if best.as_ref().is_none_or(|(top, _)| count > *top) {
            best = Some((count, name));
        }
    }
    best.map(|(_, name)| name)
}

/// Heaviest personal record; on equal weight the one set first wins, as in
/// the period metrics.
fn strongest_lift(records: Vec<PersonalRecord>) -> Option<PersonalRecord> {
    let mut best: Option<PersonalRecord> = None;
    for record in records {
        let beats = |b: &PersonalRecord| {
            record.weight > b.weight || (record.weight == b.weight && record.date < b.date)
        };
        if best.as_ref().is_none_or(beats) {
            best = Some(record);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{day, workout};

    #[test]
    fn test_no_workouts_no_insights() {
        assert_eq!(generate_training_insights(&[]), None);
    }

    #[test]
    fn test_insights_over_history() {
        // Mon, Tue, Wed of one week, then Mon two weeks later.
        let workouts = vec![
            workout(day(2024, 6, 10), &[("Squat", &[(100.0, 5), (100.0, 5)]), ("Curl", &[(20.0, 10)])]),
            workout(day(2024, 6, 11), &[("Bench Press", &[(80.0, 5)])]),
            workout(day(2024, 6, 12), &[("squat", &[(110.0, 3)])]),
            workout(day(2024, 6, 24), &[("Deadlift", &[(180.0, 1)])]),
        ];

        let insights = generate_training_insights(&workouts).unwrap();

        assert_eq!(insights.total_workouts, 4);
        assert_eq!(insights.total_volume, 1200.0 + 400.0 + 330.0 + 180.0);
        assert_eq!(insights.average_volume, 527.5);
        assert_eq!(insights.most_trained_exercise.as_deref(), Some("Squat"));
        assert_eq!(insights.strongest_lift.as_ref().unwrap().exercise, "Deadlift");
        assert_eq!(insights.favorite_day, Some(Weekday::Mon));
        assert_eq!(insights.longest_streak, 3);
        // 15 days span, 4 workouts.
        assert_eq!(insights.workouts_per_week, round1(4.0 / (15.0 / 7.0)));
    }

    #[test]
    fn test_short_history_counts_as_one_week() {
        let workouts = vec![
            workout(day(2024, 6, 10), &[("Row", &[(60.0, 10)])]),
            workout(day(2024, 6, 10), &[("Row", &[(60.0, 10)])]),
        ];

        let insights = generate_training_insights(&workouts).unwrap();
        assert_eq!(insights.workouts_per_week, 2.0);
        assert_eq!(insights.longest_streak, 1);
    }

    #[test]
    fn test_strongest_lift_ties_go_to_the_earliest_record() {
        let workouts = vec![
            workout(day(2024, 6, 3), &[("Squat", &[(140.0, 3)])]),
            workout(day(2024, 6, 10), &[("Bench Press", &[(140.0, 1)])]),
        ];

        let insights = generate_training_insights(&workouts).unwrap();
        let strongest = insights.strongest_lift.unwrap();
        assert_eq!(strongest.exercise, "Squat");
        assert_eq!(strongest.date, day(2024, 6, 3));
    }

    #[test]
    fn test_most_trained_ties_are_alphabetical() {
        let workouts = vec![workout(
            day(2024, 6, 10),
            &[("Row", &[(60.0, 10)]), ("Dip", &[(0.0, 12)])],
        )];

        let insights = generate_training_insights(&workouts).unwrap();
        assert_eq!(insights.most_trained_exercise.as_deref(), Some("Dip"));
    }
}
