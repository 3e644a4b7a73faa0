//! Graver WASM - WebAssembly bindings for graver
//!
//! This crate exposes graver-core to the gallery front-end so images can be
//! normalized in the browser before upload.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for source and encoded images
//! - `decode` - File decoding and orientation detection
//! - `normalize` - The normalizer, with the policy passed as a plain JS object
//!
//! graver-core is built without its `lossy-webp` feature here because libwebp
//! does not compile for `wasm32-unknown-unknown`. WebP output from this crate
//! is lossless and ignores `quality`; JPEG is unaffected.
//!
//! # Usage
//!
//! ```typescript
//! import init, { normalize_file } from '@graver/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const thumb = normalize_file(bytes, { maxWidth: 400, maxHeight: 300, outputFormat: 'jpeg', quality: 85 });
//! console.log(`Thumbnail ${thumb.width}x${thumb.height}, ${thumb.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod normalize;
mod types;

// Re-export public types
pub use decode::{decode_source, read_orientation};
pub use normalize::{normalize_file, normalize_image, thumbnail_policy, web_policy};
pub use types::{JsEncodedImage, JsSourceImage};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
