// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use super::*;
use crate::config::Params;
use crate::data::errors::ErrorKind;
use crate::token::InMemoryLedger;

const T0: Timestamp = Timestamp(1000);

fn registry() -> Registry {
    Registry::new(
        Address::random(),
        Address::random(),
        Address::random(),
        Params::default(),
    )
    .unwrap()
}

fn accounts(n: usize) -> Vec<Address> {
    (0..n).map(|_| Address::random()).collect()
}

fn create(r: &mut Registry, creator: &Address, participants: Vec<Address>) -> Result<Address> {
    r.create_committee(creator, participants, TokenAmount(100), 60, T0)
}

fn assert_rejected(r: &Registry, res: Result<Address>, expected: ValidationError) {
    assert_eq!(res, Err(Error::Validation(expected)));
    assert_eq!(r.committees_count(), 0);
    assert!(r.events().is_empty());
}

#[test]
fn invalid_params() {
    let params = Params {
        fee_bps: 10_001,
        ..Params::default()
    };
    let res = Registry::new(Address::random(), Address::random(), Address::random(), params);
    assert!(matches!(res, Err(ConfigError::FeeTooHigh(10_001))));
}

#[test]
fn zero_admin_or_token() {
    let res = Registry::new(
        Address::random(),
        Address::random(),
        Address::ZERO,
        Params::default(),
    );
    assert!(matches!(res, Err(ConfigError::ZeroAddress("admin"))));

    let res = Registry::new(
        Address::random(),
        Address::ZERO,
        Address::random(),
        Params::default(),
    );
    assert!(matches!(res, Err(ConfigError::ZeroAddress("token"))));
}

#[test]
fn create_records_committee() {
    let mut r = registry();
    let p = accounts(3);
    let c = create(&mut r, &p[0], p.clone()).unwrap();

    assert_eq!(r.all_committees(), vec![c]);
    assert_eq!(r.committees_count(), 1);
    assert_eq!(r.committee_at(0), Some(c));

    let committee = r.committee(&c).unwrap();
    assert_eq!(committee.address(), c);
    assert_eq!(committee.participants(), &p[..]);
    assert_eq!(committee.token(), r.token());
    assert_eq!(committee.admin(), r.admin());
    assert_eq!(committee.creator(), p[0]);
    assert_eq!(committee.fee_bps(), 500);
    assert_eq!(committee.round_start_time(), T0);

    assert_eq!(
        r.events(),
        &[Event::CommitteeCreated {
            committee: c,
            creator: p[0],
            participants: p,
            amount_per_round: TokenAmount(100),
            round_duration: 60,
        }][..]
    );
}

#[test]
fn creator_need_not_participate() {
    let mut r = registry();
    let outsider = Address::random();
    let c = create(&mut r, &outsider, accounts(2)).unwrap();
    assert!(!r.committee(&c).unwrap().is_participant(&outsider));
    assert_eq!(r.committees_by_creator(&outsider), vec![c]);
}

#[test]
fn too_few_participants() {
    let mut r = registry();
    let a = Address::random();
    let res = create(&mut r, &a, vec![a]);
    assert_rejected(&r, res, ParticipantsError::TooFew(1, 2).into());

    let res = create(&mut r, &a, Vec::new());
    assert_rejected(&r, res, ParticipantsError::TooFew(0, 2).into());
}

#[test]
fn too_many_participants() {
    let mut r = registry();
    let p = accounts(51);
    let res = create(&mut r, &p[0], p.clone());
    assert_rejected(&r, res, ParticipantsError::TooMany(51, 50).into());

    assert!(create(&mut r, &p[0], p[..50].to_vec()).is_ok());
}

#[test]
fn duplicate_participant() {
    let mut r = registry();
    let a = Address::random();
    let b = Address::random();
    let res = create(&mut r, &a, vec![a, b, a]);
    assert_rejected(&r, res, ParticipantsError::Duplicate(a).into());
}

#[test]
fn zero_address_participant() {
    let mut r = registry();
    let a = Address::random();
    let res = create(&mut r, &a, vec![a, Address::ZERO]);
    assert_rejected(&r, res, ParticipantsError::ZeroAddress(1).into());
}

#[test]
fn invalid_amount() {
    let mut r = registry();
    let p = accounts(2);
    let res = r.create_committee(&p[0], p.clone(), TokenAmount::ZERO, 60, T0);
    assert_rejected(&r, res, ValidationError::InvalidAmount);

    // The pot of a round must be representable.
    let res = r.create_committee(&p[0], p.clone(), TokenAmount(u128::MAX / 2 + 1), 60, T0);
    assert_rejected(&r, res, ValidationError::InvalidAmount);

    // So must the fee computed from it.
    let res = r.create_committee(&p[0], p.clone(), TokenAmount(u128::MAX / 4), 60, T0);
    assert_rejected(&r, res, ValidationError::InvalidAmount);
}

#[test]
fn invalid_duration() {
    let mut r = registry();
    let p = accounts(2);
    let res = r.create_committee(&p[0], p.clone(), TokenAmount(100), 0, T0);
    assert_rejected(&r, res, ValidationError::InvalidDuration);
}

#[test]
fn validation_order() {
    let mut r = registry();
    let a = Address::random();
    // Too few wins over the zero amount and duration.
    let res = r.create_committee(&a, vec![a], TokenAmount::ZERO, 0, T0);
    assert_rejected(&r, res, ParticipantsError::TooFew(1, 2).into());
}

#[test]
fn indexes() {
    let mut r = registry();
    let alice = Address::random();
    let bob = Address::random();

    let c1 = create(&mut r, &alice, accounts(2)).unwrap();
    let c2 = create(&mut r, &bob, accounts(3)).unwrap();
    let c3 = create(&mut r, &alice, accounts(4)).unwrap();

    assert_eq!(r.all_committees(), vec![c1, c2, c3]);
    assert_eq!(r.committees_by_creator(&alice), vec![c1, c3]);
    assert_eq!(r.committees_by_creator(&bob), vec![c2]);
    assert!(r.committees_by_creator(&Address::random()).is_empty());

    assert_eq!(r.committee_at(2), Some(c3));
    assert_eq!(r.committee_at(3), None);
    assert_eq!(r.creator_committee_at(&alice, 1), Some(c3));
    assert_eq!(r.creator_committee_at(&bob, 1), None);
}

#[test]
fn addresses_are_distinct() {
    let mut r = registry();
    let p = accounts(2);
    let c1 = create(&mut r, &p[0], p.clone()).unwrap();
    let c2 = create(&mut r, &p[0], p.clone()).unwrap();
    assert_ne!(c1, c2);
    assert!(!c1.is_zero());
    assert_ne!(c1, r.address());
}

#[test]
fn unknown_committee() {
    let mut r = registry();
    let mut ledger = InMemoryLedger::new(r.token(), TokenAmount::tokens(1));
    let unknown = Address::random();

    let err = r.committee(&unknown).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err, Error::UnknownCommittee(unknown));

    let caller = Address::random();
    let err = r.contribute(&mut ledger, &unknown, &caller).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(r.has_paid(&unknown, Round(1), &caller).is_err());
    assert!(r.events().is_empty());
}

#[test]
fn event_log() {
    let mut r = registry();
    let mut ledger = InMemoryLedger::new(r.token(), TokenAmount::tokens(1));
    let p = accounts(2);
    let c = create(&mut r, &p[0], p.clone()).unwrap();
    let other = create(&mut r, &p[1], accounts(2)).unwrap();

    for account in &p {
        ledger.faucet(account).unwrap();
        ledger.approve(account, &c, TokenAmount(100)).unwrap();
        r.contribute(&mut ledger, &c, account).unwrap();
    }
    assert!(r.has_paid(&c, Round(1), &p[1]).unwrap());

    // Rejected calls leave no trace.
    assert!(r.contribute(&mut ledger, &c, &p[0]).is_err());
    assert!(r.distribute_pot(&mut ledger, &c, T0.saturating_add(30)).is_err());
    assert_eq!(r.events().len(), 4);

    let events = r.distribute_pot(&mut ledger, &c, T0.saturating_add(60)).unwrap();
    assert_eq!(events.len(), 2);

    assert_eq!(r.events().len(), 6);
    assert_eq!(r.events_for(&c).len(), 5);
    assert_eq!(r.events_for(&other).len(), 1);
    assert!(matches!(r.events_for(&c)[1], Event::Contribution { .. }));
    assert!(matches!(r.events()[5], Event::RoundAdvanced { .. }));
}
