pub mod deadend;
pub mod server;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::{
            collections::VecDeque,
            ops::{Add, Neg, Sub}
        };
    }
}

pub mod prelude {
    pub use super::deadend::prelude::*;
    pub use super::server::*;
    pub use super::utils::prelude::*;
}
