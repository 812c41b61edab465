pub mod errors;
pub mod parse;
pub mod position;
pub mod source;
pub mod syntax;

#[cfg(target_family = "wasm")]
pub mod wasm;
