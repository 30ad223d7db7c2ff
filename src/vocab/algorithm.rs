//! Review interval and mastery policy
//!
//! Quality is an open-ended ordinal signal. The review card only ever
//! sends 1 ("Forgot"), 3 ("Okay") or 5 ("Easy"), but any integer maps to
//! exactly one interval band:
//!
//! - quality <= 2: 1 day
//! - quality == 3: 3 days
//! - quality == 4: 7 days
//! - quality >= 5: 30 days

use super::models::MasteryLevel;

/// Days until the next review for a grading quality
pub fn interval_days(quality: i32) -> i64 {
    match quality {
        i32::MIN..=2 => 1,
        3 => 3,
        4 => 7,
        _ => 30,
    }
}

/// One-step mastery move: a good answer promotes, a miss demotes, a
/// middling answer leaves the level alone. Saturates at both ends.
pub fn next_mastery(current: MasteryLevel, quality: i32) -> MasteryLevel {
    if quality >= 4 {
        current.stepped_up()
    } else if quality <= 2 {
        current.stepped_down()
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_bands() {
        assert_eq!(interval_days(1), 1);
        assert_eq!(interval_days(3), 3);
        assert_eq!(interval_days(4), 7);
        assert_eq!(interval_days(5), 30);
    }

    #[test]
    fn test_interval_is_total_over_unused_qualities() {
        assert_eq!(interval_days(i32::MIN), 1);
        assert_eq!(interval_days(-7), 1);
        assert_eq!(interval_days(0), 1);
        assert_eq!(interval_days(2), 1);
        assert_eq!(interval_days(6), 30);
        assert_eq!(interval_days(i32::MAX), 30);

        for quality in -10..=10 {
            assert!(matches!(interval_days(quality), 1 | 3 | 7 | 30));
        }
    }

    #[test]
    fn test_mastery_moves_at_most_one_step() {
        use MasteryLevel::*;

        assert_eq!(next_mastery(New, 5), Learning);
        assert_eq!(next_mastery(Learning, 4), Mastered);
        assert_eq!(next_mastery(Mastered, 5), Mastered);

        assert_eq!(next_mastery(Mastered, 1), Learning);
        assert_eq!(next_mastery(Learning, 2), New);
        assert_eq!(next_mastery(New, 1), New);

        // quality 3 is neutral at every level
        for level in [New, Learning, Mastered] {
            assert_eq!(next_mastery(level, 3), level);
        }
    }
}
