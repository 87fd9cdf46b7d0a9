pub mod estimator;
pub mod note;
