pub mod tabular;

pub use tabular::{write_tabular, write_to_file, write_to_stdout, AlignmentRecord};
