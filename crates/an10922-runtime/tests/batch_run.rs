//! Batch runs through the public API, checked against direct derivation.

use an10922::{
    diversify, wrap, DiversificationInput, Diversifier, DiversifierConfig, Framing, KekKey,
    MasterKey,
};
use an10922_runtime::{BatchConfig, BatchRunner, RuntimeError};

const MASTER: &str = "00112233445566778899AABBCCDDEEFF";
const KEK: &str = "000102030405060708090A0B0C0D0E0F";

#[test]
fn every_outcome_matches_a_direct_derivation() {
    let master = MasterKey::from_hex(MASTER).unwrap();
    let kek = KekKey::from_hex(KEK).unwrap();
    let input: DiversificationInput = "0102030405060708".parse().unwrap();

    let expected = wrap(&kek, &diversify(&master, &input).unwrap()).unwrap();
    assert_eq!(expected.to_hex(), "F54BF47247DB80641210B1A4D5213A0F");

    for threads in [1, 2, 8] {
        let runner = BatchRunner::new(BatchConfig {
            threads,
            requests: 25,
        })
        .unwrap();
        let report = runner.run(&Diversifier::new(), &master, &kek, &input);
        assert_eq!(report.succeeded(), 25, "{threads} threads");
        let ids: Vec<u64> = report.outcomes().iter().map(|o| o.execution_id).collect();
        assert_eq!(ids, (1..=25).collect::<Vec<u64>>());
        for outcome in report.into_outcomes() {
            assert_eq!(outcome.result.unwrap(), expected);
        }
    }
}

#[test]
fn framing_is_honoured_by_workers() {
    let master = MasterKey::from_hex(MASTER).unwrap();
    let kek = KekKey::from_hex(KEK).unwrap();
    let input: DiversificationInput = "04782E21801D803042F54E585020416275".parse().unwrap();
    let diversifier = Diversifier::with_config(DiversifierConfig {
        framing: Framing::An10922,
    });

    let report = BatchRunner::new(BatchConfig {
        threads: 2,
        requests: 4,
    })
    .unwrap()
    .run(&diversifier, &master, &kek, &input);

    let (key, _) = diversifier.diversify_and_wrap(&master, &kek, &input).unwrap();
    assert_eq!(key.to_hex(), "A8DD63A3B89D54B37CA802473FDA9175");
    let expected = wrap(&kek, &key).unwrap();
    for outcome in report.outcomes() {
        assert_eq!(outcome.result.as_ref().unwrap(), &expected);
    }
}

#[test]
fn input_errors_are_reported_per_request() {
    let master = MasterKey::from_hex(MASTER).unwrap();
    let kek = KekKey::from_hex(KEK).unwrap();
    let too_long = DiversificationInput::new(vec![0u8; 32]).unwrap();
    let diversifier = Diversifier::with_config(DiversifierConfig {
        framing: Framing::An10922,
    });

    let report = BatchRunner::new(BatchConfig {
        threads: 2,
        requests: 3,
    })
    .unwrap()
    .run(&diversifier, &master, &kek, &too_long);
    assert_eq!(report.failed(), 3);
    for outcome in report.outcomes() {
        assert!(matches!(
            outcome.result,
            Err(an10922::Error::InputFormat(
                an10922::InputFormatError::InputTooLong { len: 32, max: 31 }
            ))
        ));
    }
}

#[test]
fn zero_threads_is_a_configuration_error() {
    let result = BatchRunner::new(BatchConfig {
        threads: 0,
        requests: 1,
    });
    assert!(matches!(result, Err(RuntimeError::NoThreads)));
}
