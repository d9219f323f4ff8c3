pub mod chat;
pub mod health;
pub mod mood;

pub use chat::*;
pub use health::*;
pub use mood::*;
