//! Upload of preprocessed photos to the detection backend.
//!
//! The scanner talks to a [`DetectionBackend`]; the HTTP implementation posts
//! a multipart form to the inference service.

pub(crate) mod backend;
pub(crate) mod http;

pub use backend::DetectionBackend;
pub use http::{parse_response, HttpBackend};
