mod file_ref;
mod lane;

pub use file_ref::FileRef;
pub use lane::ProcessingLane;
