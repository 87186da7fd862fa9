use proptest::prelude::*;

use eos_primitives::ec::private_key::PrivateKey;
use eos_primitives::ec::public_key::PublicKey;
use eos_primitives::ec::signature::Signature;
use eos_primitives::hash::sha256;
use eos_primitives::util::{ByteReader, ByteWriter};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn private_key_wif_and_text_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let wif = pk.to_wif();
            let pk2 = PrivateKey::from_wif(&wif).unwrap();
            prop_assert_eq!(pk.to_hex(), pk2.to_hex());

            let text = pk.public_key().to_string();
            prop_assert!(PublicKey::is_valid(&text));
            let pub2 = PublicKey::from_text(&text).unwrap();
            prop_assert_eq!(pk.public_key(), pub2);
        }
    }

    #[test]
    fn is_valid_public_key_is_total(text in ".{0,128}") {
        // Must never panic, whatever the input.
        let _ = PublicKey::is_valid(&text);
    }

    #[test]
    fn truncated_public_key_is_invalid(seed in prop::array::uniform32(any::<u8>())) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let text = pk.public_key().to_string();
            let truncated = &text[..text.len() - 1];
            prop_assert!(!PublicKey::is_valid(truncated));
        }
    }

    #[test]
    fn sign_recover_verify_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig = Signature::sign(&digest, &pk).unwrap();
            prop_assert!(sig.verify(&digest, &pk.public_key()));
            prop_assert_eq!(sig.recover(&digest).unwrap(), pk.public_key());

            // Determinism: a second signing yields the identical signature.
            let sig2 = Signature::sign(&digest, &pk).unwrap();
            prop_assert_eq!(sig, sig2);
        }
    }

    #[test]
    fn varuint32_roundtrip(val in any::<u32>()) {
        let mut writer = ByteWriter::new();
        writer.write_varuint32(val);
        let data = writer.into_bytes();

        let mut reader = ByteReader::new(&data);
        prop_assert_eq!(reader.read_varuint32().unwrap(), val);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn shared_secret_is_symmetric(
        seed_a in prop::array::uniform32(any::<u8>()),
        seed_b in prop::array::uniform32(any::<u8>())
    ) {
        if let (Ok(a), Ok(b)) = (PrivateKey::from_bytes(&seed_a), PrivateKey::from_bytes(&seed_b)) {
            let ab = a.shared_secret(&b.public_key()).unwrap();
            let ba = b.shared_secret(&a.public_key()).unwrap();
            prop_assert_eq!(ab.as_bytes(), ba.as_bytes());
        }
    }
}
