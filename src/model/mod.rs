pub mod conversation;
pub mod message;
pub mod reply;
pub mod scenario;
