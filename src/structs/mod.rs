pub mod content_request;
