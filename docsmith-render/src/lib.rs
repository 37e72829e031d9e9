//! # docsmith-render
//!
//! Askama template definitions for docsmith's generated pages and
//! fragments. Markdown-to-HTML conversion happens in `docsmith-core`;
//! this crate only wraps the converted content in page chrome.

pub mod templates;

pub use templates::{
    ArticleView, NavLink, NavTemplate, NewsTemplate, PageTemplate, TestimonialView,
    TestimonialsTemplate,
};
