//! # studygenie-extract
//!
//! Turns uploaded PDF bytes into plain text.

pub mod pdf_text;

pub use pdf_text::{extract_text_blocking, PdfTextExtractor};
