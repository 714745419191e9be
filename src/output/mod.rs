pub mod formatter;

pub use formatter::{
    format_date, format_marks, format_summary, pluralize, should_use_colors, SECTION_BREAK,
};
