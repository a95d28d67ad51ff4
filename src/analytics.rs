//! Teacher analytics: aggregation over student progress records
//!
//! The dashboard views are averages and percentages computed straight from
//! progress records; this module owns no storage, it only folds over what
//! a [`crate::session::ProgressStore`] returns.

use std::collections::BTreeMap;

use crate::session::ProgressRecord;

/// Accuracy for one record: correct attempts over total attempts.
/// No attempts counts as perfect, the same convention the session uses
/// before any answer is in.
fn accuracy(attempts: u32, mistakes: u32) -> f64 {
    if attempts == 0 {
        return 1.0;
    }
    attempts.saturating_sub(mistakes) as f64 / attempts as f64
}

/// Aggregated view of one waypoint across students
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointSummary {
    pub waypoint_id: String,
    /// Distinct students with a record at this waypoint
    pub students: u32,
    /// Records marked completed
    pub completions: u32,
    pub completion_rate: f64,
    pub average_score: f64,
    pub average_accuracy: f64,
}

/// Aggregated view of one student across waypoints
#[derive(Clone, Debug, PartialEq)]
pub struct StudentSummary {
    pub student_id: String,
    pub waypoints_played: u32,
    pub waypoints_completed: u32,
    pub total_attempts: u32,
    pub total_mistakes: u32,
    pub overall_accuracy: f64,
    pub total_time_secs: u64,
}

/// Per-waypoint summaries, ordered by waypoint id.
///
/// The store keys records by `(student, waypoint)`, so each record counts
/// as one distinct student here.
pub fn waypoint_summaries(records: &[ProgressRecord]) -> Vec<WaypointSummary> {
    let mut groups: BTreeMap<&str, Vec<&ProgressRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.waypoint_id.as_str())
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(waypoint_id, group)| {
            let students = group.len() as u32;
            let completions = group.iter().filter(|r| r.completed).count() as u32;
            let average_score =
                group.iter().map(|r| r.score as f64).sum::<f64>() / group.len() as f64;
            let average_accuracy = group
                .iter()
                .map(|r| accuracy(r.attempts, r.mistakes))
                .sum::<f64>()
                / group.len() as f64;

            WaypointSummary {
                waypoint_id: waypoint_id.to_string(),
                students,
                completions,
                completion_rate: completions as f64 / students as f64,
                average_score,
                average_accuracy,
            }
        })
        .collect()
}

/// Totals for one student across every waypoint they have touched
pub fn student_summary(records: &[ProgressRecord], student_id: &str) -> StudentSummary {
    let mut summary = StudentSummary {
        student_id: student_id.to_string(),
        waypoints_played: 0,
        waypoints_completed: 0,
        total_attempts: 0,
        total_mistakes: 0,
        overall_accuracy: 1.0,
        total_time_secs: 0,
    };

    for record in records.iter().filter(|r| r.student_id == student_id) {
        summary.waypoints_played += 1;
        if record.completed {
            summary.waypoints_completed += 1;
        }
        summary.total_attempts += record.attempts;
        summary.total_mistakes += record.mistakes;
        summary.total_time_secs += record.time_spent_secs;
    }

    summary.overall_accuracy = accuracy(summary.total_attempts, summary.total_mistakes);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        student: &str,
        waypoint: &str,
        completed: bool,
        score: u32,
        mistakes: u32,
        attempts: u32,
    ) -> ProgressRecord {
        ProgressRecord {
            student_id: student.to_string(),
            waypoint_id: waypoint.to_string(),
            completed,
            score,
            mistakes,
            attempts,
            time_spent_secs: 60,
        }
    }

    fn sample_records() -> Vec<ProgressRecord> {
        vec![
            record("ada", "meadow", true, 20, 0, 5),
            record("ben", "meadow", true, 12, 4, 9),
            record("cleo", "meadow", false, 4, 8, 10),
            record("ada", "bridge", true, 16, 2, 7),
        ]
    }

    #[test]
    fn test_waypoint_summaries_grouped_and_ordered() {
        let summaries = waypoint_summaries(&sample_records());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].waypoint_id, "bridge");
        assert_eq!(summaries[1].waypoint_id, "meadow");

        let meadow = &summaries[1];
        assert_eq!(meadow.students, 3);
        assert_eq!(meadow.completions, 2);
        assert!((meadow.completion_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((meadow.average_score - 12.0).abs() < 1e-9);

        // (5/5 + 5/9 + 2/10) / 3
        let expected_accuracy = (1.0 + 5.0 / 9.0 + 0.2) / 3.0;
        assert!((meadow.average_accuracy - expected_accuracy).abs() < 1e-9);
    }

    #[test]
    fn test_student_summary_totals() {
        let summary = student_summary(&sample_records(), "ada");
        assert_eq!(summary.waypoints_played, 2);
        assert_eq!(summary.waypoints_completed, 2);
        assert_eq!(summary.total_attempts, 12);
        assert_eq!(summary.total_mistakes, 2);
        assert!((summary.overall_accuracy - 10.0 / 12.0).abs() < 1e-9);
        assert_eq!(summary.total_time_secs, 120);
    }

    #[test]
    fn test_student_summary_with_no_records() {
        let summary = student_summary(&sample_records(), "nobody");
        assert_eq!(summary.waypoints_played, 0);
        assert_eq!(summary.overall_accuracy, 1.0);
    }
}
