pub mod student;

pub use student::{DerivedScores, ScoredStudent, StudentFields, StudentRecord};
