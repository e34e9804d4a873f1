pub mod loader;
pub mod schema;

pub use loader::{PALETTE_BASE_NAME, PaletteLoadError, load_palette, load_palette_or_default};
