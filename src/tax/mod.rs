//! GST rate configuration and tax splitting

pub mod gst;

pub use gst::*;
