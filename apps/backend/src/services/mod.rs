//! Domain services.

pub mod inbox;

pub use inbox::InboxService;
