#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{assert_cors_headers, get_test_server};
