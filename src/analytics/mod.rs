//! Pure derivations over workout slices feeding the dashboard charts.
//!
//! Nothing here touches storage or the clock: callers pass the workouts and
//! the day considered "today".

pub mod heatmap;
pub mod insights;
pub mod metrics;
pub mod records;

pub use heatmap::{HeatmapCell, map_workouts_to_heatmap};
pub use insights::{TrainingInsights, generate_training_insights};
pub use metrics::{PersonalBest, WorkoutMetrics, generate_workout_metrics};
pub use records::{PersonalRecord, personal_records};

use crate::domain::workout::Workout;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "3m")]
    ThreeMonths,
}

impl TimeRange {
    pub fn days(self) -> u64 {
        match self {
            TimeRange::SevenDays => 7,
            TimeRange::ThirtyDays => 30,
            TimeRange::ThreeMonths => 90,
        }
    }

    /// Inclusive bounds of the `days()` calendar days ending on `today`.
    pub fn current_period(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (days_before(today, self.days() - 1), today)
    }

    /// Inclusive bounds of the equally long period right before the current one.
    pub fn previous_period(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = days_before(today, self.days());
        (days_before(end, self.days() - 1), end)
    }
}

pub(crate) fn days_before(day: NaiveDate, n: u64) -> NaiveDate {
    day.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn in_period(workout: &Workout, (start, end): (NaiveDate, NaiveDate)) -> bool {
    workout.date >= start && workout.date <= end
}

pub(crate) fn training_days<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> BTreeSet<NaiveDate> {
    workouts.into_iter().map(|w| w.date).collect()
}

/// Consecutive training days ending today, or ending yesterday when today has
/// no workout yet.
pub(crate) fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = days_before(today, 1);
    let mut cursor = if days.contains(&today) {
        today
    } else if days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

pub(crate) fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

/// Weekday with the most workouts; ties go to the earlier day of the week.
pub(crate) fn busiest_weekday<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> Option<Weekday> {
    let mut counts = [0u32; 7];
    for workout in workouts {
        counts[workout.date.weekday().num_days_from_monday() as usize] += 1;
    }
    let mut best: Option<(usize, u32)> = None;
    for (index, &count) in counts.iter().enumerate() {
        if count > 0 && best.is_none_or(|(_, top)| count > top) {
            best = Some((index, count));
        }
    }
    best.map(|(index, _)| WEEK[index])
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) mod weekday_name {
    use chrono::Weekday;
    use serde::Serializer;

    pub fn name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn serialize<S: Serializer>(day: &Option<Weekday>, serializer: S) -> Result<S::Ok, S::Error> {
        match day {
            Some(day) => serializer.serialize_some(name(*day)),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::id::RecordId;
    use crate::domain::workout::{ExerciseEntry, SetEntry, Workout, WorkoutInput};
    use chrono::NaiveDate;

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// One workout on `date` with the given `(exercise, [(weight, reps)])` blocks.
    pub fn workout(date: NaiveDate, blocks: &[(&str, &[(f64, u32)])]) -> Workout {
        let exercises = blocks
            .iter()
            .map(|(name, sets)| ExerciseEntry {
                name: name.to_string(),
                sets: sets.iter().map(|&(w, r)| SetEntry::new(w, r)).collect(),
            })
            .collect();
        Workout::from_input(
            RecordId::generate(),
            RecordId::generate(),
            WorkoutInput {
                date: Some(date),
                exercises,
                bodyweight: None,
                notes: None,
                image: None,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{day, workout};
    use super::*;

    #[test]
    fn test_periods_are_adjacent_and_equally_long() {
        let today = day(2024, 3, 31);
        assert_eq!(TimeRange::SevenDays.current_period(today), (day(2024, 3, 25), today));
        assert_eq!(
            TimeRange::SevenDays.previous_period(today),
            (day(2024, 3, 18), day(2024, 3, 24))
        );
        let (start, _) = TimeRange::ThreeMonths.current_period(today);
        assert_eq!((today - start).num_days(), 89);
    }

    #[test]
    fn test_time_range_wire_format() {
        let parsed: TimeRange = serde_json::from_str("\"3m\"").unwrap();
        assert_eq!(parsed, TimeRange::ThreeMonths);
        assert_eq!(serde_json::to_string(&TimeRange::ThirtyDays).unwrap(), "\"30d\"");
        assert!(serde_json::from_str::<TimeRange>("\"1y\"").is_err());
    }

    #[test]
    fn test_current_streak_counts_back_from_today() {
        let days: BTreeSet<_> = [day(2024, 5, 8), day(2024, 5, 9), day(2024, 5, 10), day(2024, 5, 6)]
            .into_iter()
            .collect();
        assert_eq!(current_streak(&days, day(2024, 5, 10)), 3);
        // Today not trained yet: the run ending yesterday still counts.
        assert_eq!(current_streak(&days, day(2024, 5, 11)), 3);
        assert_eq!(current_streak(&days, day(2024, 5, 12)), 0);
        assert_eq!(current_streak(&BTreeSet::new(), day(2024, 5, 12)), 0);
    }

    #[test]
    fn test_longest_streak() {
        let days: BTreeSet<_> = [
            day(2024, 1, 1),
            day(2024, 1, 2),
            day(2024, 1, 4),
            day(2024, 1, 5),
            day(2024, 1, 6),
            day(2024, 1, 9),
        ]
        .into_iter()
        .collect();
        assert_eq!(longest_streak(&days), 3);
        assert_eq!(longest_streak(&BTreeSet::new()), 0);
    }

    #[test]
    fn test_busiest_weekday_prefers_monday_on_ties() {
        // 2024-05-06 is a Monday, 2024-05-08 a Wednesday.
        let workouts = vec![
            workout(day(2024, 5, 8), &[("Squat", &[(100.0, 5)])]),
            workout(day(2024, 5, 6), &[("Squat", &[(100.0, 5)])]),
        ];
        assert_eq!(busiest_weekday(&workouts), Some(Weekday::Mon));

        let more_wednesdays = vec![
            workout(day(2024, 5, 8), &[("Squat", &[(100.0, 5)])]),
            workout(day(2024, 5, 15), &[("Squat", &[(100.0, 5)])]),
            workout(day(2024, 5, 6), &[("Squat", &[(100.0, 5)])]),
        ];
        assert_eq!(busiest_weekday(&more_wednesdays), Some(Weekday::Wed));
        assert_eq!(busiest_weekday(&Vec::<Workout>::new()), None);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(-33.36), -33.4);
    }
}
