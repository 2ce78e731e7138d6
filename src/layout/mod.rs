//! Text layout: word wrap and the character-by-character draw pass
//!
//! Input is the canonical stream produced by [`crate::markup::expand`];
//! output is a sequence of [`DrawOp`]s for the presentation layer.

pub mod cache;
pub mod draw;
pub mod measure;
pub mod style;
pub mod wrap;

pub use cache::RenderCache;
pub use draw::{render, Draw, DrawOp, RenderSettings};
pub use measure::{FixedWidth, TextMeasure};
pub use style::{TextColor, TextStyle, PALETTE};
pub use wrap::wrap;
