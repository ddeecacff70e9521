pub mod error;
pub mod feature_flags;

pub mod models;

// Studio domain modules
pub mod artifact;
pub mod booking;
pub mod catalog;
pub mod common;
pub mod notification;
pub mod report;
pub mod student;

pub use error::*;
pub use feature_flags::*;
pub use models::*;

pub use artifact::*;
pub use booking::*;
pub use catalog::*;
pub use common::*;
pub use notification::*;
pub use report::*;
pub use student::*;
