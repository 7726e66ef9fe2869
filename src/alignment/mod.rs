pub mod grouping;
pub mod offsets;
pub mod report;
pub mod segmentation;
pub mod words;
