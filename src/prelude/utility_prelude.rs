pub use crate::utility::data_processing::{shuffle, validation_split};
