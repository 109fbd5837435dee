//! Components exercised by the demo binary.

pub mod counter;
pub mod hover_card;
pub mod text_element;
