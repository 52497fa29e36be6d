pub mod codec;
pub mod source;

pub use codec::{load, save, save_gray};
pub use source::ImageSource;
