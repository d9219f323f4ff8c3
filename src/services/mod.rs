pub mod advisor;
pub mod classifier;
pub mod gateway;
pub mod keywords;
pub mod prompts;
pub mod responder;

pub use advisor::*;
pub use classifier::*;
pub use gateway::*;
pub use keywords::*;
pub use responder::*;
