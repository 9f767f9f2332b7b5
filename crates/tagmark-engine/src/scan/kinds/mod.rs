pub mod custom;
pub mod mark;

pub use custom::Custom;
pub use mark::Mark;
