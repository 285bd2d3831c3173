pub mod engine;
pub mod verdict;

pub use crate::domain::model::{ImageSource, ObjectLabel};
pub use crate::domain::ports::{ConfigProvider, LabelDetector};
pub use crate::utils::error::Result;
