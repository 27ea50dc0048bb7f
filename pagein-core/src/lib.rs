pub mod binary;
pub mod objc;
pub mod order;
pub mod sections;

pub use binary::*;
pub use objc::*;
pub use order::*;
pub use sections::*;
