pub mod brrrr;
pub mod estimators;
pub mod financing;
pub mod flip;
