pub mod favorites;
pub mod input;
pub mod progress;
pub mod results;
pub mod search;
pub mod tabs;
