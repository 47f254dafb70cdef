// Outbound message links. Nothing here performs network I/O;
// links are opened by the student's browser.

pub mod whatsapp;

pub use whatsapp::build_deep_link;
