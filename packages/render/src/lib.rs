//! # Blockcraft Render
//!
//! Turns schema blocks into platform render trees.
//!
//! ```text
//! Block ──decode──▶ TypedBlock ──Renderer──▶ RenderNode ──describe──▶ [Fragment]
//!                     │                        (web / android / ios)      │
//!                     └─ Unknown ⇒ nothing                 must agree ────┘
//! ```
//!
//! Renderers only ever see a borrowed block or page; they never hold
//! document state. Interaction comes back out as an [`Intent`].

mod android;
mod blocks;
mod contract;
mod ios;
mod node;
mod preview;
mod web;

pub use android::AndroidRenderer;
pub use blocks::{
    HeroProps, NavButtonProps, TextProps, TypedBlock, BUTTON_LABEL_SIZE, DEFAULT_BUTTON_LABEL, DEFAULT_FONT_SIZE,
    DEFAULT_HEADLINE, DEFAULT_HEADLINE_SIZE, DEFAULT_TEXT, SUBHEAD_SIZE,
};
pub use contract::{Intent, Platform, RenderMode, Renderer};
pub use ios::IosRenderer;
pub use node::{describe, Fragment, RenderNode};
pub use preview::{Previewer, EMPTY_PROJECT_NOTICE};
pub use web::WebRenderer;
