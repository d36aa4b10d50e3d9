pub mod events;
pub mod random;
pub mod room;
pub mod signaling;
pub mod time;
