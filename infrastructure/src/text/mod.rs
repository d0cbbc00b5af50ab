//! Text transform adapters

mod latex;

pub use latex::LatexShorthandTransform;
