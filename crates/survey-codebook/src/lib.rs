pub mod parser;

pub use parser::{DATA_MODEL_HEADING, NAME_HEADER, parse_field_specs};
