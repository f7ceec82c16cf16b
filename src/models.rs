use std::fmt;

use serde::{Deserialize, Serialize};

// A school term the student was enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    // Row position on the terms page; pass it back to select this term.
    pub index: usize,
    pub name: String,
    pub career: String,
    pub institution: String,
}

// Final grade information for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseGrade {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub grading_basis: String,
    // Empty while the course is in progress or ungraded.
    pub grade: String,
    pub units: Option<f64>,
    pub grade_points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSchedule {
    pub index: usize,
    pub name: String,
    pub status: String,
    pub units: f64,
    pub grading_basis: String,
    pub classes: Vec<Class>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    // Unique across every course of one schedule page.
    pub index: usize,
    pub number: u32,
    pub section: u32,
    pub component: String,
    pub schedule: Option<String>,
    pub location: String,
    pub instructor: String,
    pub start_end_date: String,
}

// The grades of one term as recorded by the grade checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermGrades {
    pub term: Term,
    pub grades: Vec<CourseGrade>,
}

// A grade that is new or changed since the previous check.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeDiff {
    pub term: String,
    pub course: String,
    pub description: String,
    pub grade: String,
}

struct Opt<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("nil"),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Term{{Index: {}, Name: {}, Career: {}, Institution: {}}}",
            self.index, self.name, self.career, self.institution
        )
    }
}

impl fmt::Display for CourseGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CourseGrade{{Index: {}, Name: {}, Description: {}, GradingBasis: {}, \
             Units: {}, Grade: {}, GradePoints: {}}}",
            self.index,
            self.name,
            self.description,
            self.grading_basis,
            Opt(&self.units),
            self.grade,
            Opt(&self.grade_points)
        )
    }
}

impl fmt::Display for CourseSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CourseSchedule{{Index: {}, Name: {}, Status: {}, Units: {}, GradingBasis: {}, Classes: [",
            self.index, self.name, self.status, self.units, self.grading_basis
        )?;
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{class}")?;
        }
        f.write_str("]}")
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Class{{Index: {}, Number: {}, Section: {}, Component: {}, Schedule: {}, \
             Location: {}, Instructor: {}, StartEndDate: {}}}",
            self.index,
            self.number,
            self.section,
            self.component,
            Opt(&self.schedule),
            self.location,
            self.instructor,
            self.start_end_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_grade_display_absent_fields() {
        let cg = CourseGrade {
            index: 1,
            name: "CS 246".into(),
            description: "Object-Oriented Software Development".into(),
            grading_basis: "Numeric Grading Basis".into(),
            grade: String::new(),
            units: Some(0.5),
            grade_points: None,
        };
        assert_eq!(
            cg.to_string(),
            "CourseGrade{Index: 1, Name: CS 246, Description: Object-Oriented Software Development, \
             GradingBasis: Numeric Grading Basis, Units: 0.5, Grade: , GradePoints: nil}"
        );
    }
}
