use crate::domain::workout::Workout;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_LEVEL: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: usize,
    pub volume: f64,
    /// Intensity 0..=4 relative to the day with the most volume.
    pub level: u8,
}

pub fn map_workouts_to_heatmap(workouts: &[Workout]) -> Vec<HeatmapCell> {
    let mut by_day: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
    for workout in workouts {
        let bucket = by_day.entry(workout.date).or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += workout.total_weight;
    }

    let max_volume = by_day.values().map(|&(_, volume)| volume).fold(0.0, f64::max);

    by_day
        .into_iter()
        .map(|(date, (count, volume))| HeatmapCell {
            date,
            count,
            volume,
            level: level(volume, max_volume),
        })
        .collect()
}

fn level(volume: f64, max_volume: f64) -> u8 {
    if volume <= 0.0 || max_volume <= 0.0 {
        return 0;
    }
    let scaled = (volume / max_volume * f64::from(MAX_LEVEL)).ceil();
    scaled.clamp(1.0, f64::from(MAX_LEVEL)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{day, workout};

    #[test]
    fn test_cells_are_bucketed_by_day_in_date_order() {
        let workouts = vec![
            workout(day(2024, 6, 12), &[("Squat", &[(100.0, 4)])]),
            workout(day(2024, 6, 10), &[("Squat", &[(100.0, 1)])]),
            workout(day(2024, 6, 12), &[("Curl", &[(25.0, 8)])]),
        ];

        let cells = map_workouts_to_heatmap(&workouts);

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].date, day(2024, 6, 10));
        assert_eq!(cells[0].count, 1);
        assert_eq!(cells[0].volume, 100.0);
        assert_eq!(cells[0].level, 1);
        assert_eq!(cells[1].date, day(2024, 6, 12));
        assert_eq!(cells[1].count, 2);
        assert_eq!(cells[1].volume, 600.0);
        assert_eq!(cells[1].level, 4);
    }

    #[test]
    fn test_levels_scale_against_busiest_day() {
        assert_eq!(level(0.0, 1000.0), 0);
        assert_eq!(level(1.0, 1000.0), 1);
        assert_eq!(level(250.0, 1000.0), 1);
        assert_eq!(level(251.0, 1000.0), 2);
        assert_eq!(level(750.0, 1000.0), 3);
        assert_eq!(level(1000.0, 1000.0), 4);
        assert_eq!(level(0.0, 0.0), 0);
    }

    #[test]
    fn test_bodyweight_only_days_still_show_up() {
        let workouts = vec![workout(day(2024, 6, 10), &[("Plank", &[(0.0, 1)])])];
        let cells = map_workouts_to_heatmap(&workouts);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].count, 1);
        assert_eq!(cells[0].level, 0);
    }

    #[test]
    fn test_empty_heatmap() {
        assert!(map_workouts_to_heatmap(&[]).is_empty());
    }
}
