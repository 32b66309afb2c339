pub mod stl;

pub use stl::{read_ascii, save, write_ascii, write_binary, StlFormat, StlOptions};
