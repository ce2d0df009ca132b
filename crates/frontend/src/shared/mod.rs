pub mod components;
pub mod page_frame;
