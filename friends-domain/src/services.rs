pub mod formatter;
pub mod relative_time;

pub use formatter::*;
pub use relative_time::*;
