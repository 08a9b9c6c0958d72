pub mod args;
pub mod coordination;
pub mod run;

pub use args::AlignArgs;
pub use run::run;
