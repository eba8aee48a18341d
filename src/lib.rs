// Reformatting serialized tree dumps for human consumption

pub mod diagnostics;
pub mod formatting;
pub mod input;
pub mod output;
