//! Output format emitters.
//!
//! Each one is a pure renderer over the shared export graph: it takes a
//! project and returns the document text. The CLI decides where the
//! text goes.
pub mod json;
pub mod resx;
pub mod tres;
pub mod xml;

/// Document declaration shared by the markup formats.
pub(crate) const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
