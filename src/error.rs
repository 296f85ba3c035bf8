// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    DimensionMismatch(String), // a mask's size differs from the image's
    InvalidParameter(String),  // thickness or alpha outside the allowed range
    WindowInit(String),        // creating the demo window failed
    WindowUpdate(String),      // updating the window buffer failed
    ImageLoad(String),         // decoding the base image failed
    ImageSave(String),         // encoding the rendered frame failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch(s) => write!(f, "Dimension mismatch: {s}"),
            Error::InvalidParameter(s) => write!(f, "Invalid parameter: {s}"),
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::ImageLoad(s) => write!(f, "Image load error: {s}"),
            Error::ImageSave(s) => write!(f, "Image save error: {s}"),
        }
    }
}
