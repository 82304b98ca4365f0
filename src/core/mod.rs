//! Core runtime pieces: the HTTP endpoint server.

pub mod http;
