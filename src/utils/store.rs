use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::to_string_pretty;

use crate::models::{GradeDiff, TermGrades};

// The grades seen on the previous run, kept as pretty-printed JSON.
pub struct GradeStore {
    path: PathBuf,
}

impl GradeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Previously recorded grades, or `None` if nothing was recorded yet.
    pub fn load(&self) -> Result<Option<Vec<TermGrades>>> {
        let exists_and_non_empty = fs::metadata(&self.path).map(|m| m.len() > 0).unwrap_or(false);
        if !exists_and_non_empty {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| anyhow!("Failed to read previous grades: {}", e))?;
        let previous = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(previous))
    }

    pub fn save(&self, grades: &[TermGrades]) -> Result<()> {
        fs::write(&self.path, to_string_pretty(grades)?)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    // Records `fetched` and returns what changed since the last call.
    //
    // The first run only records, so it reports nothing.
    pub fn update(&self, fetched: &[TermGrades]) -> Result<Vec<GradeDiff>> {
        let previous = self.load()?;
        self.save(fetched)?;
        Ok(previous
            .map(|previous| diff_grades(&previous, fetched))
            .unwrap_or_default())
    }
}

// Graded courses in `fetched` that are missing from `previous` or whose grade
// changed. Ungraded courses are ignored.
pub fn diff_grades(previous: &[TermGrades], fetched: &[TermGrades]) -> Vec<GradeDiff> {
    let mut diffs = Vec::new();

    for term in fetched {
        let old_term = previous.iter().find(|t| t.term.name == term.term.name);

        for grade in term.grades.iter().filter(|g| !g.grade.is_empty()) {
            let unchanged = old_term
                .and_then(|t| t.grades.iter().find(|g| g.name == grade.name))
                .is_some_and(|old| old.grade == grade.grade);
            if unchanged {
                continue;
            }

            diffs.push(GradeDiff {
                term: term.term.name.clone(),
                course: grade.name.clone(),
                description: grade.description.clone(),
                grade: grade.grade.clone(),
            });
        }
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseGrade, Term};

    fn term(name: &str, grades: &[(&str, &str)]) -> TermGrades {
        TermGrades {
            term: Term {
                index: 0,
                name: name.into(),
                career: "Undergraduate".into(),
                institution: "University of Waterloo".into(),
            },
            grades: grades
                .iter()
                .enumerate()
                .map(|(i, (course, grade))| CourseGrade {
                    index: i,
                    name: course.to_string(),
                    description: String::new(),
                    grading_basis: "Numeric Grading Basis".into(),
                    grade: grade.to_string(),
                    units: Some(0.5),
                    grade_points: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_diff_new_and_changed() {
        let previous = vec![term("Fall 2018", &[("CS 135", "90"), ("MATH 135", "")])];
        let fetched = vec![
            term("Fall 2018", &[("CS 135", "90"), ("MATH 135", "85")]),
            term("Winter 2019", &[("CS 136", "88"), ("MATH 136", "")]),
        ];

        let diffs = diff_grades(&previous, &fetched);
        let courses: Vec<_> = diffs.iter().map(|d| d.course.as_str()).collect();
        assert_eq!(courses, ["MATH 135", "CS 136"]);
        assert_eq!(diffs[0].grade, "85");
    }

    #[test]
    fn test_update_first_run_records_only() {
        let path = std::env::temp_dir().join(format!("uwquest-store-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        let store = GradeStore::new(&path);

        let fetched = vec![term("Fall 2018", &[("CS 135", "90")])];
        assert!(store.update(&fetched).unwrap().is_empty());
        assert_eq!(store.load().unwrap(), Some(fetched.clone()));

        let fetched = vec![term("Fall 2018", &[("CS 135", "91")])];
        assert_eq!(store.update(&fetched).unwrap().len(), 1);

        fs::remove_file(&path).unwrap();
    }
}
