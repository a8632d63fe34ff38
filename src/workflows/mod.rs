pub mod indicators;
pub mod spreadsheet;
