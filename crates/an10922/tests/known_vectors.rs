//! End-to-end known-answer scenarios through the public API.

use aes_core::{Aes128Key, BlockEncryptor, SoftAes128};
use an10922::{
    derive_subkeys, diversify, double, frame, unwrap, wrap, DiversificationInput, Diversifier,
    DiversifierConfig, Framing, KekKey, MasterKey,
};

const ZERO_K0: &str = "66E94BD4EF8A2C3B884CFA59CA342B2E";

#[test]
fn zero_master_key_scenario() {
    let zero = Aes128Key::from([0u8; 16]);
    let master = MasterKey::from_key(&zero);
    let input: DiversificationInput = "0102030405060708".parse().unwrap();

    let k0 = SoftAes128::new(&zero).encrypt_block(&[0u8; 16]).unwrap();
    assert_eq!(hex::encode_upper(k0), ZERO_K0);

    let subkeys = derive_subkeys(&master).unwrap();
    assert_eq!(subkeys.k1(), &double(&k0));
    assert_eq!(subkeys.k2(), &double(&double(&k0)));
    assert_eq!(hex::encode_upper(subkeys.k1()), "CDD297A9DF1458771099F4B39468565C");
    assert_eq!(hex::encode_upper(subkeys.k2()), "9BA52F53BE28B0EE2133E96728D0AC3F");

    assert!(frame(&input, Framing::default()).unwrap().padded());

    let key = diversify(&master, &input).unwrap();
    assert_eq!(key.to_hex(), "81E1A9502E546F71B199274A2B0038FB");

    let kek = KekKey::from_hex("000102030405060708090A0B0C0D0E0F").unwrap();
    let wrapped = wrap(&kek, &key).unwrap();
    assert_eq!(wrapped.len(), key.as_bytes().len());
    assert_eq!(wrapped.to_hex(), "CDD5D7323271534AC0CE04AA8CBBC67A");
    assert_eq!(unwrap(&kek, &wrapped).unwrap(), key);
}

#[test]
fn application_note_worked_example() {
    let master = MasterKey::from_hex("00112233445566778899AABBCCDDEEFF").unwrap();
    let subkeys = derive_subkeys(&master).unwrap();
    assert_eq!(hex::encode_upper(subkeys.k1()), "FBC9F75C9413C041DFEE452D3F0706D1");
    assert_eq!(hex::encode_upper(subkeys.k2()), "F793EEB928278083BFDC8A5A7E0E0D25");

    let input: DiversificationInput = "04782E21801D803042F54E585020416275".parse().unwrap();
    let diversifier = Diversifier::with_config(DiversifierConfig {
        framing: Framing::An10922,
    });
    let key = diversifier.diversify(&master, &input).unwrap();
    assert_eq!(key.to_hex(), "A8DD63A3B89D54B37CA802473FDA9175");

    let kek = KekKey::from_hex("000102030405060708090A0B0C0D0E0F").unwrap();
    let unprefixed = diversify(&master, &input).unwrap();
    assert_eq!(
        wrap(&kek, &unprefixed).unwrap().to_hex(),
        "7816AB5F2ECBB16D53CE88E17CC52E08"
    );
}

#[test]
fn shared_keys_across_threads() {
    let master = MasterKey::from_hex("00112233445566778899AABBCCDDEEFF").unwrap();
    let kek = KekKey::from_hex("000102030405060708090A0B0C0D0E0F").unwrap();
    let diversifier = Diversifier::new();
    let input: DiversificationInput = "00".parse().unwrap();
    let expected = diversifier.diversify_and_wrap(&master, &kek, &input).unwrap().1;

    let (diversifier, master, kek, input) = (&diversifier, &master, &kek, &input);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(move || diversifier.diversify_and_wrap(master, kek, input)))
            .collect();
        for handle in handles {
            let (_, wrapped) = handle.join().unwrap().unwrap();
            assert_eq!(wrapped, expected);
        }
    });
}
