mod abv;
mod classics;
mod flavor;
mod metrics;
mod naming;
mod suggest;

pub use abv::*;
pub use classics::*;
pub use flavor::*;
pub use metrics::*;
pub use naming::*;
pub use suggest::*;
