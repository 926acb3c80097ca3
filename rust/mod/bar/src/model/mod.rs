mod compose;
mod ingredient;
mod order;
mod premium;
mod prep;
mod recipe;
mod sale;
mod timer;

pub use compose::*;
pub use ingredient::*;
pub use order::*;
pub use premium::*;
pub use prep::*;
pub use recipe::*;
pub use sale::*;
pub use timer::*;
