mod client;
mod types;

pub use client::{Classifier, HttpClassifier};
pub use types::{BodyStatus, Prediction};
