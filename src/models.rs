use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CourseEntry {
    pub grade: String,
    pub credit_hours: f64,
}

/// Letter-grade vocabulary shared by both grading scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    F,
}

impl Grade {
    /// Case-insensitive symbol lookup; `None` for anything outside the
    /// vocabulary.
    pub fn parse(symbol: &str) -> Option<Grade> {
        match symbol.to_uppercase().as_str() {
            "A+" => Some(Grade::APlus),
            "A" => Some(Grade::A),
            "A-" => Some(Grade::AMinus),
            "B+" => Some(Grade::BPlus),
            "B" => Some(Grade::B),
            "B-" => Some(Grade::BMinus),
            "C+" => Some(Grade::CPlus),
            "C" => Some(Grade::C),
            "C-" => Some(Grade::CMinus),
            "F" => Some(Grade::F),
            _ => None,
        }
    }
}

/// Which grading-scale regime applies to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cohort {
    New,
    Returning,
}

impl Cohort {
    pub fn parse(value: &str) -> Option<Cohort> {
        match value.to_lowercase().as_str() {
            "new" => Some(Cohort::New),
            "returning" => Some(Cohort::Returning),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cohort::New => "new",
            Cohort::Returning => "returning",
        }
    }
}

/// Internship participation as reported by the caller. The variant supplied
/// selects the deduction policy: a fixed term allowance, or the
/// faculty-reported credit-hour figure deducted as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Internship {
    None,
    ShortSemester,
    LongSemester,
    Credited(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemesterResult {
    pub gpa: f64,
    pub total_credit_hours: f64,
}

#[derive(Debug, Clone)]
pub struct CumulativeInput {
    pub prior_credit_hours: f64,
    pub prior_cgpa: f64,
    pub new_credit_hours: f64,
    pub new_gpa: f64,
    pub cocurricular: bool,
    pub internship: Internship,
}

#[derive(Debug, Clone)]
pub struct GradeMix {
    pub grade: String,
    pub count: usize,
    pub credit_hours: f64,
}

#[derive(Debug, Clone)]
pub struct SavedResult {
    pub id: Uuid,
    pub student_name: String,
    pub cohort: String,
    pub gpa: f64,
    pub cgpa: f64,
    pub total_credit_hours: f64,
    pub calculated_on: NaiveDate,
}
