pub mod export;
pub mod png_codec;

pub use export::{export_filename, optimize_png, write_export, ExportTarget};
pub use png_codec::{decode_png, encode_png, SizeLimit};
