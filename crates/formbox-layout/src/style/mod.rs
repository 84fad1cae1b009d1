//! Style projection and typed style values.
//!
//! Raw style records (`formbox_tree::StyleFields`) are untyped JSON. This
//! module turns them into typed values for one viewport variant:
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/) for colors
//! - [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
//!   for borders and shadows
//! - [CSS Box Alignment Level 3](https://www.w3.org/TR/css-align-3/) for
//!   alignment keywords

mod color;
mod fields;
pub mod projection;
mod shadow;
mod values;

pub use color::ColorValue;
pub use fields::FieldReader;
pub use projection::{
    Decoration, Edges, NodeStyle, ParentFacts, ResolutionContext, declared_extent, project,
};
pub use shadow::BoxShadow;
pub use values::{Align, BorderStyle, Overflow, Visibility};
