pub mod formatter;

pub use formatter::{
    format_company_detail, format_company_table, format_company_tsv, format_lists,
    format_page_footer, format_saved_searches, format_score, format_signal_report, format_thesis,
    format_timeline, should_use_colors,
};
