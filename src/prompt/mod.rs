pub mod augment;

pub use augment::{augment_prompt, STYLE_SUFFIX};
