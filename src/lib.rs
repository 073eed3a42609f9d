pub mod args;
pub mod csvout;
pub mod domain;
pub mod error;
pub mod grep;
pub mod labels;
pub mod record;
pub mod uniq;
pub mod utils;

pub use args::{Args, Command};
pub use error::FilterError;
pub use labels::{aggregate, AggregateOptions, LabelDepth};
pub use record::Record;
