pub mod answer;
pub mod report;
