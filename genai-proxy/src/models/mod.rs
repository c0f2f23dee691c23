pub mod gemini;
pub mod portrait;

pub use portrait::PortraitRequest;
