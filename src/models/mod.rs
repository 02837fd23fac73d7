pub mod caption;
pub mod image;
pub mod post;
pub mod publish;

pub use caption::*;
pub use image::*;
pub use post::*;
pub use publish::*;
