mod string;
pub use string::*;

mod value;
pub use value::*;

mod convert;
pub use convert::*;

mod container;
pub use container::*;

mod persist;
pub use persist::*;
