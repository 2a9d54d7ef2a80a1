mod item;

pub use item::*;
