// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod forecast;
pub mod ids;
pub mod model;
pub mod sort;
pub mod state;

pub use forecast::*;
pub use ids::*;
pub use model::*;
pub use sort::*;
pub use state::*;
