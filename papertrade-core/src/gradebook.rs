//! Student grade tracker model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub grade: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradeError {
    #[error("student name must not be empty")]
    EmptyName,

    #[error("grade {0} is not a number")]
    InvalidGrade(f64),
}

/// Average, best and worst of the recorded grades.
///
/// Ties for highest or lowest go to the student added first.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSummary {
    pub average: f64,
    pub highest: Student,
    pub lowest: Student,
    pub count: usize,
}

/// Students in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Gradebook {
    students: Vec<Student>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, grade: f64) -> Result<&Student, GradeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GradeError::EmptyName);
        }
        if !grade.is_finite() {
            return Err(GradeError::InvalidGrade(grade));
        }
        self.students.push(Student {
            name: name.to_string(),
            grade,
        });
        Ok(&self.students[self.students.len() - 1])
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// `None` for an empty gradebook.
    pub fn summary(&self) -> Option<GradeSummary> {
        let first = self.students.first()?;
        let mut highest = first;
        let mut lowest = first;
        let mut total = 0.0;
        for s in &self.students {
            total += s.grade;
            if s.grade > highest.grade {
                highest = s;
            }
            if s.grade < lowest.grade {
                lowest = s;
            }
        }
        Some(GradeSummary {
            average: total / self.students.len() as f64,
            highest: highest.clone(),
            lowest: lowest.clone(),
            count: self.students.len(),
        })
    }
}
