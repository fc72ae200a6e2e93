use std::fmt::Write;

use crate::grading;
use crate::models::{Cohort, CourseEntry, Grade, GradeMix, SemesterResult};

pub fn summarize_grades(entries: &[CourseEntry]) -> Vec<GradeMix> {
    let mut map: std::collections::HashMap<String, (usize, f64)> =
        std::collections::HashMap::new();

    for entry in entries {
        let slot = map.entry(entry.grade.to_uppercase()).or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += entry.credit_hours;
    }

    let mut mixes: Vec<GradeMix> = map
        .into_iter()
        .map(|(grade, (count, credit_hours))| GradeMix {
            grade,
            count,
            credit_hours,
        })
        .collect();

    mixes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.grade.cmp(&b.grade)));
    mixes
}

pub fn build_report(
    student: Option<&str>,
    cohort: Cohort,
    entries: &[CourseEntry],
    semester: &SemesterResult,
    cumulative: Option<f64>,
) -> String {
    let mixes = summarize_grades(entries);

    let mut output = String::new();
    let student_label = student.unwrap_or("unnamed student");

    let _ = writeln!(output, "# Grade Point Report");
    let _ = writeln!(
        output,
        "Generated for {} ({} scale)",
        student_label,
        cohort.label()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Mix");

    if mixes.is_empty() {
        let _ = writeln!(output, "No course entries supplied.");
    } else {
        for mix in mixes.iter() {
            let _ = writeln!(
                output,
                "- {}: {} courses ({:.1} credit hours)",
                mix.grade, mix.count, mix.credit_hours
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Course Breakdown");

    if entries.is_empty() {
        let _ = writeln!(output, "No course entries supplied.");
    } else {
        for entry in entries.iter() {
            let points =
                Grade::parse(&entry.grade).map_or(0.0, |grade| grading::grade_points(grade, cohort));
            let _ = writeln!(
                output,
                "- {}: {:.1} credit hours at {:.2} grade points",
                entry.grade.to_uppercase(),
                entry.credit_hours,
                points
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Semester Summary");
    let _ = writeln!(
        output,
        "Semester GPA {:.2} across {:.1} credit hours.",
        semester.gpa, semester.total_credit_hours
    );

    if let Some(cgpa) = cumulative {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Cumulative Standing");
        let _ = writeln!(output, "Cumulative CGPA {:.2}.", cgpa);
    }

    output
}
