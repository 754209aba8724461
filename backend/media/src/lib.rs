//! Bitmap work for the bot: attachment filtering, caption rendering, and
//! crop/composite/encode of detected regions.

pub mod caption;
pub mod compose;
pub mod filter;

pub use caption::{CaptionRenderer, TypefaceRenderer};
pub use compose::{RegionCrop, caption_region, decode_image, encode_png};
pub use filter::{image_attachments, is_raster_image};
