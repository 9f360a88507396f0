pub mod pnc;
pub mod traits;

pub mod prelude {
    pub use super::pnc::prelude::*;
    pub use super::traits::Parser;
}
