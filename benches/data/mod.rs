// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod basics;
mod committee;

pub use basics::*;
pub use committee::*;
