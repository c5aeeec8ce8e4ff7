pub mod bit_tree;

pub use bit_tree::BitTree;
