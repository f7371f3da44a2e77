//! The extraction core: pure functions from extracted document text to an
//! ordered sequence of validated point names. No I/O, no shared state.

mod document;
mod row;
mod token;

#[cfg(test)]
mod tests;

pub use document::PointNameParser;
pub use row::point_name_from_section;
pub use token::{clean_token, is_valid_point_name};
