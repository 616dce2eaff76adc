// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use criterion::{BatchSize, Criterion};

use qameti::config::Params;
use qameti::data::basics::{Address, Timestamp, TokenAmount};
use qameti::data::registry::Registry;
use qameti::data::store::Store;
use qameti::token::{InMemoryLedger, TokenLedger};

const PARTICIPANTS: usize = 50;
const DURATION: u64 = 60;

/// A registry with one committee whose participants are funded and have
/// approved it for every round.
fn setup() -> (Registry, InMemoryLedger, Address, Vec<Address>) {
    let params = Params::default();
    let token = Address::random();
    let mut ledger = InMemoryLedger::new(token, params.faucet_amount);
    let mut registry = Registry::new(Address::random(), token, Address::random(), params)
        .expect("default params are valid");

    let participants: Vec<Address> = (0..PARTICIPANTS).map(|_| Address::random()).collect();
    let committee = registry
        .create_committee(
            &participants[0],
            participants.clone(),
            TokenAmount::tokens(10),
            DURATION,
            Timestamp(0),
        )
        .expect("valid committee");
    for p in &participants {
        ledger.faucet(p).expect("faucet");
        ledger
            .approve(p, &committee, TokenAmount(u128::MAX))
            .expect("approve");
    }
    (registry, ledger, committee, participants)
}

pub fn committee_lifecycle(c: &mut Criterion) {
    c.bench_function("committee::lifecycle(50)", |b| {
        b.iter_batched(
            setup,
            |(mut registry, mut ledger, committee, participants)| {
                for round in 1..=PARTICIPANTS as u64 {
                    for p in &participants {
                        registry.contribute(&mut ledger, &committee, p).unwrap();
                    }
                    registry
                        .distribute_pot(&mut ledger, &committee, Timestamp(round * DURATION))
                        .unwrap();
                }
                registry
            },
            BatchSize::SmallInput,
        );
    });
}

pub fn persist_registry(c: &mut Criterion) {
    let (registry, ledger, _, _) = setup();
    let store = Store::temporary().expect("temporary store");

    c.bench_function("store::Store::save()", |b| {
        b.iter(|| store.save(&registry, &ledger).unwrap())
    });
}
