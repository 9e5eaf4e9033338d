pub mod observation;
pub mod query;
pub mod time;

pub use observation::*;
pub use query::*;
pub use time::*;
