//! Plain data types shared by the philosophers, the table and the controller.

pub mod state;
pub mod timing;

pub use state::*;
pub use timing::*;
