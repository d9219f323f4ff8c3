pub mod chat;
pub mod mood;

pub use chat::*;
pub use mood::*;
