//! Rendering contract
//!
//! Drawing itself is left to an external renderer. This module turns a
//! `GameState` snapshot into plain draw data: colored rectangles in back to
//! front order, HUD scalars and screen text.

pub mod draw_list;
pub mod palette;

pub use draw_list::{BossHealth, DrawCommand, FrameOutput, Hud, ScreenText, draw_commands};
