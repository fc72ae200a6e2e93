use crate::models::{Cohort, CourseEntry, CumulativeInput, Grade, Internship, SemesterResult};

/// Credit hours deducted from the prior total for co-curricular
/// participation.
pub const COCURRICULAR_DEDUCTION: f64 = 2.0;

/// Grade-point value of a letter grade under the scale selected by
/// `cohort`. The returning scale does not offer A+; it scores 0.0 there.
pub fn grade_points(grade: Grade, cohort: Cohort) -> f64 {
    match cohort {
        Cohort::New => match grade {
            Grade::APlus => 4.0,
            Grade::A => 4.0,
            Grade::AMinus => 3.67,
            Grade::BPlus => 3.33,
            Grade::B => 3.0,
            Grade::BMinus => 2.67,
            Grade::CPlus => 2.33,
            Grade::C => 2.0,
            Grade::CMinus => 0.0,
            Grade::F => 0.0,
        },
        Cohort::Returning => match grade {
            Grade::APlus => 0.0,
            Grade::A => 4.0,
            Grade::AMinus => 3.75,
            Grade::BPlus => 3.5,
            Grade::B => 3.0,
            Grade::BMinus => 2.75,
            Grade::CPlus => 2.5,
            Grade::C => 2.0,
            Grade::CMinus => 0.0,
            Grade::F => 0.0,
        },
    }
}

/// Credit hours deducted from the prior total for an internship, mapped
/// from the descriptor the caller supplied.
pub fn internship_deduction(internship: Internship) -> f64 {
    match internship {
        Internship::None => 0.0,
        Internship::ShortSemester => 5.0,
        Internship::LongSemester => 8.0,
        Internship::Credited(hours) => hours,
    }
}

/// Credit-hour-weighted mean of grade points across `entries`. Symbols
/// outside the vocabulary score 0.0, the same as a failing grade. Entries
/// are taken exactly as supplied; filtering is the caller's job.
pub fn semester_gpa(entries: &[CourseEntry], cohort: Cohort) -> SemesterResult {
    let mut total_credit_hours = 0.0;
    let mut weighted_points = 0.0;

    for entry in entries {
        let points = Grade::parse(&entry.grade).map_or(0.0, |grade| grade_points(grade, cohort));
        total_credit_hours += entry.credit_hours;
        weighted_points += points * entry.credit_hours;
    }

    let gpa = if total_credit_hours > 0.0 {
        weighted_points / total_credit_hours
    } else {
        0.0
    };

    SemesterResult {
        gpa,
        total_credit_hours,
    }
}

/// Merges a semester's performance into the running cumulative average.
/// Deductions apply to the prior credit hours first, each clamped at zero;
/// a zero combined credit total yields 0.0 rather than an error.
pub fn cumulative_cgpa(input: &CumulativeInput) -> f64 {
    let mut adjusted = input.prior_credit_hours;

    if input.cocurricular {
        adjusted = (adjusted - COCURRICULAR_DEDUCTION).max(0.0);
    }

    let deduction = internship_deduction(input.internship);
    if deduction > 0.0 {
        adjusted = (adjusted - deduction).max(0.0);
    }

    let total_credits = adjusted + input.new_credit_hours;
    if total_credits > 0.0 {
        (input.prior_cgpa * adjusted + input.new_gpa * input.new_credit_hours) / total_credits
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(grade: &str, credit_hours: f64) -> CourseEntry {
        CourseEntry {
            grade: grade.to_string(),
            credit_hours,
        }
    }

    fn merge(
        prior_credit_hours: f64,
        prior_cgpa: f64,
        new_credit_hours: f64,
        new_gpa: f64,
        cocurricular: bool,
        internship: Internship,
    ) -> f64 {
        cumulative_cgpa(&CumulativeInput {
            prior_credit_hours,
            prior_cgpa,
            new_credit_hours,
            new_gpa,
            cocurricular,
            internship,
        })
    }

    #[test]
    fn empty_entries_yield_zero_result() {
        for cohort in [Cohort::New, Cohort::Returning] {
            let result = semester_gpa(&[], cohort);
            assert_eq!(result.gpa, 0.0);
            assert_eq!(result.total_credit_hours, 0.0);
        }
    }

    #[test]
    fn single_a_scores_four_under_new_scale() {
        let result = semester_gpa(&[entry("A", 3.0)], Cohort::New);
        assert_eq!(result.gpa, 4.0);
        assert_eq!(result.total_credit_hours, 3.0);
    }

    #[test]
    fn scales_diverge_on_a_minus() {
        let courses = [entry("A-", 4.0)];
        let new = semester_gpa(&courses, Cohort::New);
        let returning = semester_gpa(&courses, Cohort::Returning);
        assert!((new.gpa - 3.67).abs() < 0.001);
        assert!((returning.gpa - 3.75).abs() < 0.001);
        assert_eq!(new.total_credit_hours, 4.0);
        assert_eq!(returning.total_credit_hours, 4.0);
    }

    #[test]
    fn gpa_is_weighted_by_credit_hours() {
        let result = semester_gpa(&[entry("B", 3.0), entry("C", 2.0)], Cohort::New);
        let expected = (3.0 * 3.0 + 2.0 * 2.0) / 5.0;
        assert!((result.gpa - expected).abs() < 0.001);
        assert_eq!(result.total_credit_hours, 5.0);
    }

    #[test]
    fn unknown_symbol_scores_zero_but_hours_still_count() {
        let result = semester_gpa(&[entry("A", 3.0), entry("E", 2.0)], Cohort::New);
        assert_eq!(result.total_credit_hours, 5.0);
        assert!((result.gpa - 12.0 / 5.0).abs() < 0.001);
    }

    #[test]
    fn grade_symbols_match_case_insensitively() {
        let result = semester_gpa(&[entry("b+", 3.0)], Cohort::New);
        assert!((result.gpa - 3.33).abs() < 0.001);
    }

    #[test]
    fn a_plus_is_not_offered_on_the_returning_scale() {
        let result = semester_gpa(&[entry("A+", 3.0)], Cohort::Returning);
        assert_eq!(result.gpa, 0.0);
        assert_eq!(result.total_credit_hours, 3.0);
    }

    #[test]
    fn total_hours_sum_every_supplied_entry() {
        // No filtering happens here; zero and negative hours flow through.
        let result = semester_gpa(
            &[entry("A", 3.0), entry("B", 0.0), entry("C", -1.0)],
            Cohort::New,
        );
        assert_eq!(result.total_credit_hours, 2.0);
        assert!((result.gpa - (4.0 * 3.0 - 2.0) / 2.0).abs() < 0.001);
    }

    #[test]
    fn plain_merge_weights_by_credit_hours() {
        let cgpa = merge(30.0, 3.5, 15.0, 3.8, false, Internship::None);
        assert!((cgpa - 3.6).abs() < 0.001);
    }

    #[test]
    fn cocurricular_deducts_two_prior_hours() {
        // Equal averages survive the deduction unchanged.
        let unchanged = merge(10.0, 3.0, 10.0, 3.0, true, Internship::None);
        assert!((unchanged - 3.0).abs() < 0.001);

        // Unequal averages shift toward the new semester once prior hours
        // shrink from 10 to 8.
        let shifted = merge(10.0, 2.0, 10.0, 4.0, true, Internship::None);
        let expected = (2.0 * 8.0 + 4.0 * 10.0) / 18.0;
        assert!((shifted - expected).abs() < 0.001);
    }

    #[test]
    fn internship_deduction_clamps_at_zero() {
        let cgpa = merge(1.0, 3.0, 5.0, 3.0, false, Internship::Credited(8.0));
        assert!((cgpa - 3.0).abs() < 0.001);
    }

    #[test]
    fn fixed_term_allowances_deduct_five_and_eight_hours() {
        let short = merge(10.0, 3.0, 6.0, 2.0, false, Internship::ShortSemester);
        assert!((short - 27.0 / 11.0).abs() < 0.001);

        let long = merge(10.0, 3.0, 6.0, 2.0, false, Internship::LongSemester);
        assert!((long - 18.0 / 8.0).abs() < 0.001);
    }

    #[test]
    fn deductions_compose_before_the_merge() {
        // 12 prior hours lose 2 for co-curriculars, then 4 for the
        // internship, leaving 6.
        let cgpa = merge(12.0, 3.5, 3.0, 2.0, true, Internship::Credited(4.0));
        let expected = (3.5 * 6.0 + 2.0 * 3.0) / 9.0;
        assert!((cgpa - expected).abs() < 0.001);
    }

    #[test]
    fn zero_total_credits_yield_zero() {
        assert_eq!(merge(0.0, 0.0, 0.0, 0.0, false, Internship::None), 0.0);
        assert_eq!(merge(5.0, 3.0, 0.0, 0.0, false, Internship::Credited(5.0)), 0.0);
    }

    #[test]
    fn deduction_mapping_covers_every_descriptor() {
        assert_eq!(internship_deduction(Internship::None), 0.0);
        assert_eq!(internship_deduction(Internship::ShortSemester), 5.0);
        assert_eq!(internship_deduction(Internship::LongSemester), 8.0);
        assert_eq!(internship_deduction(Internship::Credited(7.5)), 7.5);
    }

    #[test]
    fn repeat_calls_are_bit_identical() {
        let courses = [entry("A-", 4.0), entry("B+", 3.0), entry("C", 2.0)];
        let first = semester_gpa(&courses, Cohort::Returning);
        let second = semester_gpa(&courses, Cohort::Returning);
        assert_eq!(first.gpa.to_bits(), second.gpa.to_bits());
        assert_eq!(
            first.total_credit_hours.to_bits(),
            second.total_credit_hours.to_bits()
        );

        let once = merge(30.0, 3.25, 12.0, 3.67, true, Internship::Credited(5.0));
        let twice = merge(30.0, 3.25, 12.0, 3.67, true, Internship::Credited(5.0));
        assert_eq!(once.to_bits(), twice.to_bits());
    }
}
