//! Derives a card key from the application note's example identifiers and
//! exports it under a KEK.

use an10922::{
    unwrap, DiversificationInput, Diversifier, DiversifierConfig, Framing, KekKey, MasterKey,
};

fn main() -> Result<(), an10922::Error> {
    let master = MasterKey::from_hex("00112233445566778899AABBCCDDEEFF")?;
    let kek = KekKey::from_hex("000102030405060708090A0B0C0D0E0F")?;

    // UID || AID || system identifier
    let input: DiversificationInput =
        ["04782E21801D80", "3042F5", "4E585020416275"].concat().parse()?;
    let diversifier = Diversifier::with_config(DiversifierConfig {
        framing: Framing::An10922,
    });
    let (key, wrapped) = diversifier.diversify_and_wrap(&master, &kek, &input)?;
    assert_eq!(key.to_hex(), "A8DD63A3B89D54B37CA802473FDA9175");
    assert_eq!(unwrap(&kek, &wrapped)?, key);

    println!("wrapped key: {wrapped}");
    Ok(())
}
