//! Boundary data-transfer shapes.
//!
//! Inbound shapes carry data that is not yet persisted; outbound shapes carry
//! data that already is. Neither talks to storage.

pub mod book;
