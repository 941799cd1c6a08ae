pub mod png_codec;

pub use png_codec::{decode_png, encode_png, is_png, PNG_SIGNATURE};
