pub mod demo;
pub mod web_buffer;
