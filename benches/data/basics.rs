// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::str::FromStr;

use criterion::Criterion;
use rand::{thread_rng, RngCore};

use qameti::data::basics::{Address, TokenAmount, ADDRESS_LEN};

pub fn address_to_string(c: &mut Criterion) {
    let mut rng = thread_rng();
    let mut addr_bytes = [0; ADDRESS_LEN];

    c.bench_function("basics::Address::to_string()", |b| {
        b.iter_with_setup(
            || {
                rng.fill_bytes(&mut addr_bytes);
                Address(addr_bytes)
            },
            |addr| addr.to_string(),
        );
    });
}

pub fn address_from_str(c: &mut Criterion) {
    let mut rng = thread_rng();
    let mut addr_bytes = [0; ADDRESS_LEN];

    c.bench_function("basics::Address::from_str()", |b| {
        b.iter_with_setup(
            || {
                rng.fill_bytes(&mut addr_bytes);
                Address(addr_bytes).to_string()
            },
            |addr_str| Address::from_str(&addr_str),
        );
    });
}

pub fn parse_units(c: &mut Criterion) {
    c.bench_function("basics::TokenAmount::parse_units()", |b| {
        b.iter(|| TokenAmount::parse_units("12345.000000000000000678"))
    });
}
