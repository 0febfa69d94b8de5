pub mod error;
pub mod events;

pub use error::{PixelError, PixelResult};
pub use events::{EventView, LineItem, TrackEvent};
